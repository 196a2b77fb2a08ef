use crate::model::SongId;
use crate::paging::PageError;
use songbook_database::DatabaseError;
use songbook_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`CatalogError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The requested song id is absent.
    #[error("Song not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Page/size out of bounds for verse windowing.
    #[error("Invalid page number{}: {source}", format_context(.context))]
    InvalidPage {
        #[source]
        source: PageError,
        context: Option<Cow<'static, str>>,
    },

    /// The lookup service was unreachable, too slow, or answered with a non-success status.
    #[error("Enrichment failed{}: {message}", format_context(.context))]
    EnrichmentFailed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The lookup service answered with a body that is not a song detail.
    #[error("Malformed song details{}: {message}", format_context(.context))]
    Decode { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Persistence failures, passed through from the store.
    #[error("Store error{}: {message}", format_context(.context))]
    Store { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) fn not_found(id: SongId) -> Self {
        Self::NotFound { message: format!("no song with id {id}").into(), context: None }
    }

    fn set_context(&mut self, value: Cow<'static, str>) {
        match self {
            Self::NotFound { context, .. }
            | Self::InvalidPage { context, .. }
            | Self::EnrichmentFailed { context, .. }
            | Self::Decode { context, .. }
            | Self::Store { context, .. } => *context = Some(value),
        }
    }
}

/// Adds `.context(...)` to catalog results.
pub trait CatalogErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CatalogError>;
}

impl<T> CatalogErrorExt<T> for Result<T, CatalogError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CatalogError> {
        self.map_err(|mut e| {
            e.set_context(context.into());
            e
        })
    }
}

impl<T> CatalogErrorExt<T> for Result<T, PageError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CatalogError> {
        self.map_err(|source| CatalogError::InvalidPage { source, context: Some(context.into()) })
    }
}

impl From<PageError> for CatalogError {
    fn from(source: PageError) -> Self {
        Self::InvalidPage { source, context: None }
    }
}

impl From<DatabaseError> for CatalogError {
    fn from(err: DatabaseError) -> Self {
        Self::Store { message: err.to_string().into(), context: None }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => Self::not_found(err.to_string()),
            CatalogError::InvalidPage { .. } => Self::bad_request(err.to_string()),
            CatalogError::EnrichmentFailed { .. }
            | CatalogError::Decode { .. }
            | CatalogError::Store { .. } => Self::internal(err.to_string()),
        }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(CatalogError::not_found(7));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Song not found: no song with id 7");
    }

    #[test]
    fn invalid_page_maps_to_400_with_context() {
        let result: Result<(), PageError> = Err(PageError::ZeroSize);
        let err = result.context("Song 3").unwrap_err();
        assert_eq!(err.to_string(), "Invalid page number (Song 3): page size must be at least 1");
        assert_eq!(ApiError::from(err).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_and_store_failures_map_to_500() {
        for err in [
            CatalogError::EnrichmentFailed { message: "timed out".into(), context: None },
            CatalogError::Decode { message: "missing field".into(), context: None },
            CatalogError::Store { message: "disk".into(), context: None },
        ] {
            assert_eq!(ApiError::from(err).status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
