//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the shared [`server::ApiState`],
//! the JSON error envelope and the system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use songbook_kernel::config::{config_path, load_config};
//! use songbook_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some(config_path())).unwrap();
//! assert!(cfg.catalog.default_page_size > 0);
//! ```
pub mod config;
pub mod server;

pub use songbook_domain as domain;
