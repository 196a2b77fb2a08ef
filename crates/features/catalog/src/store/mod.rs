//! Persistence seam of the catalog.

mod memory;
mod surreal;

pub use memory::MemorySongStore;
pub use surreal::SurrealSongStore;

use crate::error::CatalogError;
use crate::model::{NewSong, Song, SongFilter, SongId};
use async_trait::async_trait;
use std::fmt::Debug;

/// Durable song records with offset/limit listing.
///
/// Implement this trait to swap the backing store (tests use [`MemorySongStore`]).
#[async_trait]
pub trait SongStore: Debug + Send + Sync {
    /// Songs matching `filter`, ordered by id, skipping `offset` and returning at most `limit`.
    async fn list(
        &self,
        filter: &SongFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Song>, CatalogError>;

    async fn get(&self, id: SongId) -> Result<Option<Song>, CatalogError>;

    /// Stores a new song under a freshly assigned id.
    async fn insert(&self, song: NewSong) -> Result<Song, CatalogError>;

    /// Overwrites the record with `song.id`; `false` when no such record exists.
    async fn update(&self, song: &Song) -> Result<bool, CatalogError>;

    /// Removes the record; `false` when nothing was removed.
    async fn delete(&self, id: SongId) -> Result<bool, CatalogError>;
}
