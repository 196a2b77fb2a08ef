#![allow(dead_code, unreachable_pub)]

use async_trait::async_trait;
use songbook_catalog::CatalogError;
use songbook_catalog::lookup::SongLookup;
use songbook_catalog::model::SongDetail;
use songbook_catalog::store::MemorySongStore;
use songbook_catalog::SongCatalog;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const LYRICS: &str = "A\n\nB\n\nC";

/// Answers every lookup with the same detail, or with the same failure.
#[derive(Debug)]
pub struct FakeLookup {
    outcome: Result<SongDetail, fn() -> CatalogError>,
    calls: AtomicUsize,
}

impl FakeLookup {
    pub fn with_text(text: &str) -> Self {
        Self {
            outcome: Ok(SongDetail {
                release_date: "16.07.2006".to_owned(),
                text: text.to_owned(),
                link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_owned(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            outcome: Err(|| CatalogError::EnrichmentFailed {
                message: "HTTP 503: Service Unavailable".into(),
                context: None,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn garbled() -> Self {
        Self {
            outcome: Err(|| CatalogError::Decode {
                message: "missing field `link`".into(),
                context: None,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SongLookup for FakeLookup {
    async fn lookup(&self, _group: &str, _song: &str) -> Result<SongDetail, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(|make| make())
    }
}

pub fn catalog_with(
    lookup: FakeLookup,
    default_page_size: u64,
) -> (SongCatalog, Arc<MemorySongStore>, Arc<FakeLookup>) {
    let store = Arc::new(MemorySongStore::new());
    let lookup = Arc::new(lookup);
    let catalog = SongCatalog::new(store.clone(), lookup.clone(), default_page_size);
    (catalog, store, lookup)
}
