//! Lyric text as an ordered sequence of verses separated by a blank line.

/// Two consecutive newlines end a verse.
pub const VERSE_DELIMITER: &str = "\n\n";

/// Splits lyric text into verses, scanning left to right without overlapping delimiters.
///
/// Never returns an empty sequence: `""` yields `[""]`. Whitespace inside a verse is kept as is.
///
/// ```rust
/// use songbook_catalog::verses::split;
///
/// assert_eq!(split("A\n\nB"), ["A", "B"]);
/// assert_eq!(split("A\n\n\nB"), ["A", "\nB"]);
/// ```
#[must_use]
pub fn split(text: &str) -> Vec<&str> {
    text.split(VERSE_DELIMITER).collect()
}

/// Re-inserts the delimiter between consecutive verses; `join(&split(t)) == t`.
#[must_use]
pub fn join(verses: &[&str]) -> String {
    verses.join(VERSE_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_empty_verse() {
        assert_eq!(split(""), [""]);
    }

    #[test]
    fn delimiters_do_not_overlap() {
        assert_eq!(split("A\n\n\n\nB"), ["A", "", "B"]);
        assert_eq!(split("A\n\n"), ["A", ""]);
    }

    #[test]
    fn single_newline_stays_inside_verse() {
        assert_eq!(split("line one\nline two"), ["line one\nline two"]);
    }

    #[test]
    fn join_restores_window() {
        let verses = split("A\n\nB\n\nC");
        assert_eq!(join(&verses[..2]), "A\n\nB");
        assert_eq!(join(&verses[2..]), "C");
    }
}
