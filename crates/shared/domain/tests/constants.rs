use songbook_domain::constants::{COUNTER, SONG, SONGS_TAG, SYSTEM_TAG};

#[test]
fn constants_match_entity_strings() {
    assert_eq!(SONG, "song");
    assert_eq!(COUNTER, "counter");
}

#[test]
fn openapi_tags_are_distinct() {
    assert_ne!(SONGS_TAG, SYSTEM_TAG);
}
