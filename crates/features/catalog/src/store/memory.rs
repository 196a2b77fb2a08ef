use super::SongStore;
use crate::error::CatalogError;
use crate::model::{NewSong, Song, SongFilter, SongId};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Songs {
    last_id: SongId,
    by_id: BTreeMap<SongId, Song>,
}

/// Process-local store; ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemorySongStore {
    songs: RwLock<Songs>,
}

impl MemorySongStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored songs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.read().by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SongStore for MemorySongStore {
    async fn list(
        &self,
        filter: &SongFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Song>, CatalogError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(self
            .songs
            .read()
            .by_id
            .values()
            .filter(|song| filter.matches(song))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn get(&self, id: SongId) -> Result<Option<Song>, CatalogError> {
        Ok(self.songs.read().by_id.get(&id).cloned())
    }

    async fn insert(&self, song: NewSong) -> Result<Song, CatalogError> {
        let mut songs = self.songs.write();
        songs.last_id = songs.last_id.checked_add(1).ok_or_else(|| CatalogError::Store {
            message: "song id space exhausted".into(),
            context: None,
        })?;
        let song = song.with_id(songs.last_id);
        songs.by_id.insert(song.id, song.clone());
        Ok(song)
    }

    async fn update(&self, song: &Song) -> Result<bool, CatalogError> {
        Ok(self.songs.write().by_id.get_mut(&song.id).map(|stored| *stored = song.clone()).is_some())
    }

    async fn delete(&self, id: SongId) -> Result<bool, CatalogError> {
        Ok(self.songs.write().by_id.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_song(group: &str, title: &str) -> NewSong {
        NewSong {
            group: group.to_owned(),
            song: title.to_owned(),
            text: "Verse".to_owned(),
            link: "https://example.com".to_owned(),
            release_date: "2006".to_owned(),
        }
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let store = MemorySongStore::new();
        let first = store.insert(new_song("Muse", "Starlight")).await.unwrap();
        assert_eq!(first.id, 1);
        assert!(store.delete(first.id).await.unwrap());

        let second = store.insert(new_song("Muse", "Knights of Cydonia")).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn listing_windows_in_id_order() {
        let store = MemorySongStore::new();
        for n in 0..5 {
            store.insert(new_song("Muse", &format!("Track {n}"))).await.unwrap();
        }

        let page: Vec<SongId> = store
            .list(&SongFilter::default(), 2, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|song| song.id)
            .collect();
        assert_eq!(page, [3, 4]);
        assert!(store.list(&SongFilter::default(), 10, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_records() {
        let store = MemorySongStore::new();
        let ghost = new_song("Muse", "Ghost").with_id(42);
        assert!(!store.update(&ghost).await.unwrap());
        assert!(!store.delete(42).await.unwrap());
    }
}
