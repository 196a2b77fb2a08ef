//! External song-detail lookup used to enrich new songs.

use crate::error::CatalogError;
use crate::model::SongDetail;
use async_trait::async_trait;
use reqwest::StatusCode;
use songbook_domain::config::EnrichmentConfig;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("songbook/", env!("CARGO_PKG_VERSION"));

/// Fetches release date, lyrics and link for a `(group, song)` pair.
///
/// Implement this trait to substitute the HTTP client in tests.
#[async_trait]
pub trait SongLookup: Debug + Send + Sync {
    async fn lookup(&self, group: &str, song: &str) -> Result<SongDetail, CatalogError>;
}

/// `GET {base_url}?group=..&song=..` against the configured lookup service.
///
/// Every request is bounded by the client-wide timeout, so a stalled upstream
/// surfaces as [`CatalogError::EnrichmentFailed`] instead of hanging the caller.
#[derive(Debug, Clone)]
pub struct HttpSongLookup {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpSongLookup {
    /// Builds a client from the `enrichment` config section.
    pub fn new(config: &EnrichmentConfig) -> Result<Self, CatalogError> {
        Self::with_timeouts(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| CatalogError::EnrichmentFailed {
                message: e.to_string().into(),
                context: Some("Building HTTP client".into()),
            })?;

        Ok(Self { http_client, base_url: base_url.into() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SongLookup for HttpSongLookup {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn lookup(&self, group: &str, song: &str) -> Result<SongDetail, CatalogError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| CatalogError::EnrichmentFailed {
                message: e.to_string().into(),
                context: Some(if e.is_timeout() { "Deadline exceeded" } else { "Sending request" }.into()),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CatalogError::EnrichmentFailed {
                message: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
                .into(),
                context: Some("Unexpected status".into()),
            });
        }

        let body = response.bytes().await.map_err(|e| CatalogError::EnrichmentFailed {
            message: e.to_string().into(),
            context: Some("Reading body".into()),
        })?;
        debug!(bytes = body.len(), "Song details received");

        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode {
            message: e.to_string().into(),
            context: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_takes_base_url_from_config() {
        let config = EnrichmentConfig::default();
        let lookup = HttpSongLookup::new(&config).unwrap();
        assert_eq!(lookup.base_url(), config.base_url);
    }

    #[test]
    fn user_agent_names_the_crate_version() {
        assert!(USER_AGENT.starts_with("songbook/"));
    }
}
