//! Shared string constants (`OpenAPI` tags, table names).

/// `OpenAPI` tag for system endpoints (health, diagnostics).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the song catalog endpoints.
pub const SONGS_TAG: &str = "Songs";

/// Table holding song records.
pub const SONG: &str = "song";
/// Table holding id counters.
pub const COUNTER: &str = "counter";
