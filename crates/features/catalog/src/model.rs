use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Store-assigned song identifier; positive and increasing.
pub type SongId = u64;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Song ID
    pub id: SongId,
    /// Performing group
    pub group: String,
    /// Song title
    pub song: String,
    /// Lyrics, verses separated by a blank line
    pub text: String,
    /// External link
    pub link: String,
    /// Release date as reported by the lookup service
    pub release_date: String,
}

/// A song that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group: String,
    pub song: String,
    pub text: String,
    pub link: String,
    pub release_date: String,
}

impl NewSong {
    /// Combines the client's group/title with the lookup result.
    #[must_use]
    pub fn enriched(payload: SongPayload, detail: SongDetail) -> Self {
        Self {
            group: payload.group,
            song: payload.song,
            text: detail.text,
            link: detail.link,
            release_date: detail.release_date,
        }
    }

    #[must_use]
    pub fn with_id(self, id: SongId) -> Song {
        Song {
            id,
            group: self.group,
            song: self.song,
            text: self.text,
            link: self.link,
            release_date: self.release_date,
        }
    }
}

/// Create/update body. Only `group` and `song` are read; any other field is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SongPayload {
    /// Performing group
    pub group: String,
    /// Song title
    pub song: String,
}

/// Enrichment result returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongDetail {
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Listing predicates; absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    /// Case-insensitive substring of the group
    pub group: Option<String>,
    /// Case-insensitive substring of the title
    pub song: Option<String>,
    /// Exact release date
    pub release_date: Option<String>,
}

impl SongFilter {
    #[must_use]
    pub fn matches(&self, song: &Song) -> bool {
        contains_ignore_case(&song.group, self.group.as_deref())
            && contains_ignore_case(&song.song, self.song.as_deref())
            && self.release_date.as_deref().is_none_or(|date| date == song.release_date)
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

/// Query string of `GET /songs`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Filter by group (case-insensitive substring)
    pub group: Option<String>,
    /// Filter by song title (case-insensitive substring)
    pub song: Option<String>,
    /// Filter by release date (exact)
    pub release_date: Option<String>,
    /// Page number, 1-based (default 1)
    pub page: Option<u64>,
    /// Page size (default from `catalog.default_page_size`)
    pub size: Option<u64>,
}

impl ListQuery {
    #[must_use]
    pub fn filter(&self) -> SongFilter {
        SongFilter {
            group: self.group.clone(),
            song: self.song.clone(),
            release_date: self.release_date.clone(),
        }
    }
}

/// Query string of `GET /songs/{id}/text`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TextQuery {
    /// Verse page number, 1-based (default 1)
    pub page: Option<u64>,
    /// Verses per page (default from `catalog.default_page_size`)
    pub size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(group: &str, title: &str, date: &str) -> Song {
        Song {
            id: 1,
            group: group.to_owned(),
            song: title.to_owned(),
            text: String::new(),
            link: String::new(),
            release_date: date.to_owned(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(SongFilter::default().matches(&song("Muse", "Hysteria", "2003")));
    }

    #[test]
    fn group_and_title_match_substrings_ignoring_case() {
        let filter = SongFilter {
            group: Some("mUs".to_owned()),
            song: Some("TERIA".to_owned()),
            release_date: None,
        };
        assert!(filter.matches(&song("Muse", "Hysteria", "2003")));
        assert!(!filter.matches(&song("Queen", "Hysteria", "2003")));
    }

    #[test]
    fn release_date_is_exact() {
        let filter = SongFilter { release_date: Some("16.07.2006".to_owned()), ..SongFilter::default() };
        assert!(filter.matches(&song("Muse", "Supermassive Black Hole", "16.07.2006")));
        assert!(!filter.matches(&song("Muse", "Supermassive Black Hole", "16.07.200")));
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(song("Muse", "Hysteria", "2003")).unwrap();
        assert_eq!(json["releaseDate"], "2003");
        assert!(json.get("release_date").is_none());
    }

    #[test]
    fn payload_ignores_extra_fields() {
        let payload: SongPayload = serde_json::from_str(
            r#"{"id": 9, "group": "Muse", "song": "Uprising", "text": "ignored", "releaseDate": "x"}"#,
        )
        .unwrap();
        assert_eq!(payload, SongPayload { group: "Muse".to_owned(), song: "Uprising".to_owned() });
    }
}
