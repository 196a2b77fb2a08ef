use crate::error::{CatalogError, CatalogErrorExt};
use crate::lookup::SongLookup;
use crate::model::{NewSong, Song, SongFilter, SongId, SongPayload};
use crate::paging::{PageRequest, paginate};
use crate::store::SongStore;
use crate::verses;
use songbook_domain::registry::FeatureSlice;
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Collaborators and settings behind [`SongCatalog`].
#[derive(Debug)]
pub struct SongCatalogInner {
    store: Arc<dyn SongStore>,
    lookup: Arc<dyn SongLookup>,
    default_page_size: u64,
}

/// Catalog feature state: listing, verse pages, enrichment on create, update and delete.
#[derive(Debug, Clone)]
pub struct SongCatalog {
    inner: Arc<SongCatalogInner>,
}

impl SongCatalog {
    pub fn new(
        store: Arc<dyn SongStore>,
        lookup: Arc<dyn SongLookup>,
        default_page_size: u64,
    ) -> Self {
        Self { inner: Arc::new(SongCatalogInner { store, lookup, default_page_size }) }
    }

    /// Page 1 and the configured page size fill in for absent values.
    #[must_use]
    pub fn page_request(&self, page: Option<u64>, size: Option<u64>) -> PageRequest {
        PageRequest::new(page.unwrap_or(1), size.unwrap_or(self.default_page_size))
    }

    /// Lists one page of songs matching `filter`.
    ///
    /// Bounds are not checked here: the window is pushed to the store as offset/limit,
    /// so a page past the end is simply empty, page 0 reads as page 1 and size 0 yields nothing.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &SongFilter,
        page: Option<u64>,
        size: Option<u64>,
    ) -> Result<Vec<Song>, CatalogError> {
        let request = self.page_request(page, size);
        if request.limit() == 0 {
            return Ok(Vec::new());
        }
        let songs = self.store.list(filter, request.offset(), request.limit()).await?;
        debug!(count = songs.len(), "Songs listed");
        Ok(songs)
    }

    /// Returns one page of verses of the song's lyrics, joined back into text.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] for an unknown id, [`CatalogError::InvalidPage`] when the
    /// page does not exist for this song.
    #[instrument(skip(self))]
    pub async fn text(
        &self,
        id: SongId,
        page: Option<u64>,
        size: Option<u64>,
    ) -> Result<String, CatalogError> {
        let song = self.find(id).await?;
        let verses = verses::split(&song.text);
        let window = paginate(&verses, self.page_request(page, size))
            .context(format!("song {id} has {} verses", verses.len()))?;
        Ok(verses::join(window))
    }

    /// Enriches the payload via the lookup service, then stores it.
    ///
    /// Nothing is stored when the lookup fails.
    #[instrument(skip(self))]
    pub async fn create(&self, payload: SongPayload) -> Result<Song, CatalogError> {
        let detail = self.lookup.lookup(&payload.group, &payload.song).await?;
        let song = self.store.insert(NewSong::enriched(payload, detail)).await?;
        info!(id = song.id, "Song created");
        Ok(song)
    }

    /// Replaces group and title; lyrics, link and release date stay as stored.
    #[instrument(skip(self))]
    pub async fn update(&self, id: SongId, payload: SongPayload) -> Result<Song, CatalogError> {
        let mut song = self.find(id).await?;
        song.group = payload.group;
        song.song = payload.song;

        if !self.store.update(&song).await? {
            return Err(CatalogError::not_found(id));
        }
        info!(id, "Song updated");
        Ok(song)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: SongId) -> Result<(), CatalogError> {
        if !self.store.delete(id).await? {
            return Err(CatalogError::not_found(id));
        }
        info!(id, "Song deleted");
        Ok(())
    }

    async fn find(&self, id: SongId) -> Result<Song, CatalogError> {
        self.store.get(id).await?.ok_or_else(|| CatalogError::not_found(id))
    }
}

impl Deref for SongCatalog {
    type Target = SongCatalogInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl SongCatalogInner {
    #[must_use]
    pub const fn default_page_size(&self) -> u64 {
        self.default_page_size
    }
}

impl FeatureSlice for SongCatalog {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
