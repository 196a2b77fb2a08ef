//! Song catalog feature slice.
//!
//! Lists songs page by page, serves lyrics in verse pages, enriches new songs through an
//! external lookup, and updates or deletes them. Storage and lookup sit behind the
//! [`store::SongStore`] and [`lookup::SongLookup`] traits so either can be replaced.
//!
//! ```rust
//! use songbook_catalog::paging::{PageRequest, paginate};
//! use songbook_catalog::verses;
//!
//! let verses = verses::split("A\n\nB\n\nC");
//! let page = paginate(&verses, PageRequest::new(2, 2)).unwrap();
//! assert_eq!(verses::join(page), "C");
//! ```

mod error;
mod handlers;
pub mod lookup;
pub mod model;
pub mod paging;
mod service;
pub mod store;
pub mod verses;

pub use error::{CatalogError, CatalogErrorExt};
pub use handlers::router;
pub use service::{SongCatalog, SongCatalogInner};

use lookup::HttpSongLookup;
use songbook_database::Database;
use songbook_domain::config::ApiConfig;
use songbook_domain::registry::InitializedSlice;
use std::sync::Arc;
use store::SurrealSongStore;

/// Initialize the catalog feature on top of the shared database.
///
/// # Errors
/// Returns [`CatalogError::EnrichmentFailed`] if the lookup client cannot be built.
pub fn init(config: &ApiConfig, db: &Database) -> Result<InitializedSlice, CatalogError> {
    let lookup = HttpSongLookup::new(&config.enrichment)?;
    let store = SurrealSongStore::new(db.clone());
    let catalog = SongCatalog::new(
        Arc::new(store),
        Arc::new(lookup),
        u64::from(config.catalog.default_page_size),
    );

    tracing::info!(
        lookup = %config.enrichment.base_url,
        default_page_size = config.catalog.default_page_size,
        "Catalog slice initialized"
    );

    Ok(InitializedSlice::new(catalog))
}
