use songbook_logger::{LevelFilter, Logger, Rotation};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_logging_writes_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("songbook-file-logging")
        .console(false)
        .path(&log_dir)
        .rotation(Rotation::NEVER)
        .json()
        .level(LevelFilter::INFO)
        .init()?;

    tracing::info!(song_id = 7, "song created");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let first = contents.lines().next().expect("at least one line");
    assert!(first.starts_with('{'), "json output expected, got: {first}");
    assert!(contents.contains("song created"));

    Ok(())
}
