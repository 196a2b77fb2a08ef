use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use songbook_database::Database;
use songbook_kernel::domain::config::ApiConfig;
use songbook_kernel::domain::registry::{FeatureSlice, InitializedSlice};
use songbook_kernel::server::router::system_router;
use songbook_kernel::server::{ApiState, ApiStateError};
use std::any::Any;
use tower::ServiceExt;

#[derive(Debug)]
struct Setlist(Vec<&'static str>);

impl FeatureSlice for Setlist {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Unregistered;

impl FeatureSlice for Unregistered {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

async fn memory_db() -> Database {
    Database::builder().url("mem://").session("test", "kernel").init().await.unwrap()
}

#[tokio::test]
async fn registered_slices_are_found_by_type() {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(memory_db().await)
        .register_slice(InitializedSlice::new(Setlist(vec!["Intro", "Outro"])))
        .build()
        .unwrap();

    assert_eq!(state.try_get_slice::<Setlist>().unwrap().0.len(), 2);
    assert!(matches!(
        state.try_get_slice::<Unregistered>(),
        Err(ApiStateError::MissingSlice { .. })
    ));
    assert_eq!(state.slice_names().count(), 1);
}

#[test]
fn database_is_mandatory() {
    let err = ApiState::builder().build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[tokio::test]
async fn health_route_reports_up() {
    let (router, _) = system_router::<()>().split_for_parts();

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store, no-cache, must-revalidate"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "up");
}
