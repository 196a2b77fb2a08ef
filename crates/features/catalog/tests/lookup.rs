use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;
use songbook_catalog::CatalogError;
use songbook_catalog::lookup::{HttpSongLookup, SongLookup};
use std::collections::HashMap;
use std::time::Duration;

/// Serves `router` on an ephemeral local port and returns its `/info` URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{address}/info")
}

fn client(base_url: String) -> HttpSongLookup {
    HttpSongLookup::with_timeouts(base_url, Duration::from_millis(300), Duration::from_secs(1))
        .unwrap()
}

#[tokio::test]
async fn detail_is_decoded_and_params_are_encoded() {
    let url = serve(Router::new().route(
        "/info",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            axum::Json(json!({
                "releaseDate": "25.07.1980",
                "text": format!("{}|{}", params["group"], params["song"]),
                "link": "https://example.com/acdc",
            }))
        }),
    ))
    .await;

    let detail = client(url).lookup("AC/DC & Friends", "Back in Black?").await.unwrap();

    assert_eq!(detail.text, "AC/DC & Friends|Back in Black?");
    assert_eq!(detail.release_date, "25.07.1980");
}

#[tokio::test]
async fn non_ok_status_fails_enrichment() {
    let url = serve(Router::new().route("/info", get(|| async { StatusCode::NOT_FOUND }))).await;

    let err = client(url).lookup("Muse", "Uprising").await.unwrap_err();

    assert!(matches!(err, CatalogError::EnrichmentFailed { .. }));
    assert!(err.to_string().contains("HTTP 404"));
}

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let url = serve(
        Router::new()
            .route("/info", get(|| async { axum::Json(json!({ "text": "only text" })) })),
    )
    .await;

    let err = client(url).lookup("Muse", "Uprising").await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode { .. }));
}

#[tokio::test]
async fn slow_upstream_hits_the_deadline() {
    let url = serve(Router::new().route(
        "/info",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            StatusCode::OK
        }),
    ))
    .await;

    let err = client(url).lookup("Muse", "Uprising").await.unwrap_err();
    assert!(matches!(err, CatalogError::EnrichmentFailed { .. }));
}

#[tokio::test]
async fn unreachable_upstream_fails_enrichment() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{address}/info")).lookup("Muse", "Uprising").await.unwrap_err();
    assert!(matches!(err, CatalogError::EnrichmentFailed { .. }));
}
