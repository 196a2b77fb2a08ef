use crate::model::{ListQuery, Song, SongId, SongPayload, TextQuery};
use crate::service::SongCatalog;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use songbook_domain::constants::SONGS_TAG;
use songbook_kernel::server::{ApiError, ApiState, ErrorBody};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/songs` routes of the catalog slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_songs, create_song))
        .routes(routes!(update_song, delete_song))
        .routes(routes!(song_text))
}

#[utoipa::path(
    get,
    path = "/songs",
    params(ListQuery),
    responses(
        (status = OK, description = "One page of songs, ordered by id", body = [Song]),
        (status = BAD_REQUEST, description = "Malformed query", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Store failure", body = ErrorBody),
    ),
    tag = SONGS_TAG,
)]
pub(crate) async fn list_songs(
    State(state): State<ApiState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Song>>, ApiError> {
    let Query(query) = query?;
    let catalog = state.try_get_slice::<SongCatalog>()?;
    let songs = catalog.list(&query.filter(), query.page, query.size).await?;
    Ok(Json(songs))
}

#[utoipa::path(
    get,
    path = "/songs/{id}/text",
    params(("id" = u64, Path, description = "Song ID"), TextQuery),
    responses(
        (status = OK, description = "Requested verses joined by a blank line", body = String),
        (status = BAD_REQUEST, description = "Page out of range", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown song", body = ErrorBody),
    ),
    tag = SONGS_TAG,
)]
pub(crate) async fn song_text(
    State(state): State<ApiState>,
    id: Result<Path<SongId>, PathRejection>,
    query: Result<Query<TextQuery>, QueryRejection>,
) -> Result<Json<String>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let catalog = state.try_get_slice::<SongCatalog>()?;
    let text = catalog.text(id, query.page, query.size).await?;
    Ok(Json(text))
}

#[utoipa::path(
    post,
    path = "/songs",
    request_body = SongPayload,
    responses(
        (status = CREATED, description = "Song enriched and stored", body = Song),
        (status = BAD_REQUEST, description = "Malformed body", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Lookup or store failure", body = ErrorBody),
    ),
    tag = SONGS_TAG,
)]
pub(crate) async fn create_song(
    State(state): State<ApiState>,
    payload: Result<Json<SongPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let Json(payload) = payload?;
    let catalog = state.try_get_slice::<SongCatalog>()?;
    let song = catalog.create(payload).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

#[utoipa::path(
    put,
    path = "/songs/{id}",
    params(("id" = u64, Path, description = "Song ID")),
    request_body = SongPayload,
    responses(
        (status = OK, description = "Group and title replaced", body = Song),
        (status = BAD_REQUEST, description = "Malformed body", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown song", body = ErrorBody),
    ),
    tag = SONGS_TAG,
)]
pub(crate) async fn update_song(
    State(state): State<ApiState>,
    id: Result<Path<SongId>, PathRejection>,
    payload: Result<Json<SongPayload>, JsonRejection>,
) -> Result<Json<Song>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let catalog = state.try_get_slice::<SongCatalog>()?;
    let song = catalog.update(id, payload).await?;
    Ok(Json(song))
}

#[utoipa::path(
    delete,
    path = "/songs/{id}",
    params(("id" = u64, Path, description = "Song ID")),
    responses(
        (status = NO_CONTENT, description = "Song removed"),
        (status = NOT_FOUND, description = "Unknown song", body = ErrorBody),
    ),
    tag = SONGS_TAG,
)]
pub(crate) async fn delete_song(
    State(state): State<ApiState>,
    id: Result<Path<SongId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let catalog = state.try_get_slice::<SongCatalog>()?;
    catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
