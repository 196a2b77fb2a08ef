use anyhow::Context;
use songbook_kernel::config::{config_path, load_config};
use songbook_logger::Logger;
use songbook_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some(config_path())).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
