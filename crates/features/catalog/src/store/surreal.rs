use super::SongStore;
use crate::error::CatalogError;
use crate::model::{NewSong, Song, SongFilter, SongId};
use async_trait::async_trait;
use songbook_database::{Database, DatabaseErrorExt};
use songbook_domain::constants::{COUNTER, SONG};
use surrealdb::types::SurrealValue;
use tracing::instrument;

const SONG_FIELDS: &str = "sid, group_name, title, lyrics, link, release_date";

/// Row shape of the `song` table (see the `catalog` migration).
#[derive(Debug, SurrealValue)]
struct SongRow {
    sid: i64,
    group_name: String,
    title: String,
    lyrics: String,
    link: String,
    release_date: String,
}

impl SongRow {
    fn into_song(self) -> Result<Song, CatalogError> {
        let id = SongId::try_from(self.sid).map_err(|_| CatalogError::Store {
            message: format!("stored song id {} is negative", self.sid).into(),
            context: None,
        })?;
        Ok(Song {
            id,
            group: self.group_name,
            song: self.title,
            text: self.lyrics,
            link: self.link,
            release_date: self.release_date,
        })
    }
}

/// Ids above `i64::MAX` are never handed out, so they address nothing.
fn to_sid(id: SongId) -> Option<i64> {
    i64::try_from(id).ok()
}

fn clamp(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `SurrealDB`-backed store over the `song` table; ids come from the `counter:song` record.
#[derive(Debug, Clone)]
pub struct SurrealSongStore {
    db: Database,
}

impl SurrealSongStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    async fn next_sid(&self) -> Result<i64, CatalogError> {
        let sql = format!("UPSERT {COUNTER}:{SONG} SET seq += 1 RETURN VALUE seq");
        let issued: Vec<i64> = self
            .db
            .query(sql)
            .await
            .context("Issuing song id")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Issuing song id")?
            .take(0)
            .context("Decoding song id")?;

        issued.into_iter().next().ok_or_else(|| CatalogError::Store {
            message: "id counter returned nothing".into(),
            context: None,
        })
    }
}

#[async_trait]
impl SongStore for SurrealSongStore {
    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &SongFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Song>, CatalogError> {
        let mut conditions = Vec::new();
        if filter.group.is_some() {
            conditions.push("string::contains(string::lowercase(group_name), $group)");
        }
        if filter.song.is_some() {
            conditions.push("string::contains(string::lowercase(title), $title)");
        }
        if filter.release_date.is_some() {
            conditions.push("release_date = $release_date");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT {SONG_FIELDS} FROM {SONG}{where_clause} ORDER BY sid ASC LIMIT $limit START $start"
        );
        let mut query =
            self.db.query(sql).bind(("limit", clamp(limit))).bind(("start", clamp(offset)));
        if let Some(group) = &filter.group {
            query = query.bind(("group", group.to_lowercase()));
        }
        if let Some(title) = &filter.song {
            query = query.bind(("title", title.to_lowercase()));
        }
        if let Some(date) = &filter.release_date {
            query = query.bind(("release_date", date.clone()));
        }

        let rows: Vec<SongRow> = query
            .await
            .context("Listing songs")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Listing songs")?
            .take(0)
            .context("Decoding songs")?;

        rows.into_iter().map(SongRow::into_song).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: SongId) -> Result<Option<Song>, CatalogError> {
        let Some(sid) = to_sid(id) else { return Ok(None) };

        let rows: Vec<SongRow> = self
            .db
            .query(format!("SELECT {SONG_FIELDS} FROM {SONG} WHERE sid = $sid LIMIT 1"))
            .bind(("sid", sid))
            .await
            .context("Loading song")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Loading song")?
            .take(0)
            .context("Decoding song")?;

        rows.into_iter().next().map(SongRow::into_song).transpose()
    }

    #[instrument(skip(self, song), fields(group = %song.group, title = %song.song))]
    async fn insert(&self, song: NewSong) -> Result<Song, CatalogError> {
        let sid = self.next_sid().await?;

        self.db
            .query(format!(
                "CREATE {SONG} CONTENT {{ sid: $sid, group_name: $group, title: $title, \
                 lyrics: $lyrics, link: $link, release_date: $release_date }} RETURN NONE"
            ))
            .bind(("sid", sid))
            .bind(("group", song.group.clone()))
            .bind(("title", song.song.clone()))
            .bind(("lyrics", song.text.clone()))
            .bind(("link", song.link.clone()))
            .bind(("release_date", song.release_date.clone()))
            .await
            .context("Creating song")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Creating song")?;

        let id = SongId::try_from(sid).map_err(|_| CatalogError::Store {
            message: format!("id counter issued negative id {sid}").into(),
            context: None,
        })?;
        Ok(song.with_id(id))
    }

    #[instrument(skip(self, song), fields(id = song.id))]
    async fn update(&self, song: &Song) -> Result<bool, CatalogError> {
        let Some(sid) = to_sid(song.id) else { return Ok(false) };

        let updated: Vec<i64> = self
            .db
            .query(format!(
                "UPDATE {SONG} SET group_name = $group, title = $title, lyrics = $lyrics, \
                 link = $link, release_date = $release_date WHERE sid = $sid RETURN VALUE sid"
            ))
            .bind(("sid", sid))
            .bind(("group", song.group.clone()))
            .bind(("title", song.song.clone()))
            .bind(("lyrics", song.text.clone()))
            .bind(("link", song.link.clone()))
            .bind(("release_date", song.release_date.clone()))
            .await
            .context("Updating song")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Updating song")?
            .take(0)
            .context("Decoding updated ids")?;

        Ok(!updated.is_empty())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: SongId) -> Result<bool, CatalogError> {
        let Some(sid) = to_sid(id) else { return Ok(false) };

        let existing: Vec<i64> = self
            .db
            .query(format!(
                "SELECT VALUE sid FROM {SONG} WHERE sid = $sid; \
                 DELETE {SONG} WHERE sid = $sid RETURN NONE;"
            ))
            .bind(("sid", sid))
            .await
            .context("Deleting song")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Deleting song")?
            .take(0)
            .context("Decoding deleted ids")?;

        Ok(!existing.is_empty())
    }
}
