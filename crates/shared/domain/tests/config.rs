use songbook_domain::config::{
    ApiConfig, CatalogConfig, DatabaseConfig, EnrichmentConfig, ServerConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 8080);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "songbook");
    assert_eq!(db.database, "catalog");
    assert!(db.credentials.is_none());

    let enrichment = EnrichmentConfig::default();
    assert_eq!(enrichment.timeout_secs, 10);
    assert!(enrichment.base_url.starts_with("https://"));

    assert_eq!(CatalogConfig::default().default_page_size, 10);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 9090 },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
        "enrichment": { "base_url": "http://localhost:7000/info", "timeout_secs": 2 },
        "catalog": { "default_page_size": 25 }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 9090);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.enrichment.base_url, "http://localhost:7000/info");
    assert_eq!(cfg.enrichment.timeout_secs, 2);
    assert_eq!(cfg.enrichment.connect_timeout_secs, 3, "missing keys fall back to defaults");
    assert_eq!(cfg.catalog.default_page_size, 25);
}

#[test]
fn deref_mut_clones_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 1;

    assert_eq!(original.server.port, 8080);
    assert_eq!(changed.server.port, 1);
}
