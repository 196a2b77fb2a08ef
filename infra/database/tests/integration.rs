use songbook_database::*;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.name(), "test_db");
}

#[tokio::test]
async fn song_schema_is_applied_on_init() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "schema_db")
        .init()
        .await
        .expect("connect to mem://");

    let mut response = db
        .query("SELECT VALUE name FROM migration WHERE name = 'catalog'")
        .await
        .expect("query migrations");
    let names: Vec<String> = response.take(0).expect("take names");
    assert_eq!(names, vec!["catalog".to_owned()]);
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn missing_session_fails_validation() {
    let err = Database::builder().url("mem://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
    assert!(err.to_string().contains("Namespace"));
}
