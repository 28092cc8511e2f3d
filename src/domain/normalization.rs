//! Strict, deterministic text canonicalization used to join tracks.
//!
//! Matching is exact on the normalized string. There is no similarity scoring
//! here: two tracks either share a match key or they don't.

use std::sync::LazyLock;

use regex::Regex;

/// Seconds two durations may differ by and still be considered the same recording.
pub const DEFAULT_DURATION_TOLERANCE_SECS: u32 = 5;

/// `(official ...)`, `[official ...]`, `(lyric ...)`, `[lyric ...]`, up to the
/// first matching closing bracket.
static DECORATION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\(official.*?\)|\[official.*?\]|\(lyric.*?\)|\[lyric.*?\]")
        .expect("decoration tag pattern is valid")
});

fn normalize_punctuation(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{2013}' | '\u{2014}' => '-',
        _ => c,
    }
}

/// Normalize a string for comparison
///
/// Applies: lowercase, quote and dash folding, removal of official/lyric
/// video tags, whitespace collapse. `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut out: String = text.to_lowercase().chars().map(normalize_punctuation).collect();

    // Removing one tag can splice together another, e.g. "(off(official)icial)".
    while DECORATION_TAG.is_match(&out) {
        out = DECORATION_TAG.replace_all(&out, "").into_owned();
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The join key for a track: `normalize(title)|normalize(artist)`.
pub fn match_key(title: &str, artist: &str) -> String {
    format!("{}|{}", normalize(title), normalize(artist))
}

/// An absent duration on either side can't disprove a match.
pub fn durations_match(a: Option<u32>, b: Option<u32>, tolerance_secs: u32) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.abs_diff(b) <= tolerance_secs,
        _ => true,
    }
}

/// An absent (or empty) album on either side can't disprove a match.
pub fn albums_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => normalize(a) == normalize(b),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Hello World"), "hello world");
        assert_eq!(normalize("  test  "), "test");
        assert_eq!(normalize("hello    world"), "hello world");
        assert_eq!(normalize("tab\tand\nnewline"), "tab and newline");
    }

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize("\u{201C}Heroes\u{201D}"), "\"heroes\"");
        assert_eq!(normalize("Don\u{2019}t Stop"), "don't stop");
        assert_eq!(normalize("AC\u{2014}DC \u{2013} Live"), "ac-dc - live");
    }

    #[test]
    fn test_strips_official_and_lyric_tags() {
        assert_eq!(normalize("Song Title (Official Video)"), "song title");
        assert_eq!(normalize("Song Title [OFFICIAL AUDIO]"), "song title");
        assert_eq!(normalize("Song (Lyric Video) Title"), "song title");
        assert_eq!(normalize("Song [lyrics]"), "song");
        // Non-greedy: only up to the first closing bracket.
        assert_eq!(normalize("A (Official) (Live)"), "a (live)");
        // Unrelated parentheticals are kept.
        assert_eq!(normalize("Song (Remastered 2011)"), "song (remastered 2011)");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Song Title (Official Video)",
            "a (official) b",
            "(off(official)icial) tail",
            "  BOHEMIAN   RHAPSODY  ",
            "\u{201C}Quoted\u{201D} \u{2014} dash",
            "[lyric (official x)] y)",
            "",
            "   ",
            "İstanbul",
        ];

        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_match_key() {
        assert_eq!(
            match_key("Bohemian Rhapsody", "Queen"),
            match_key("  BOHEMIAN   RHAPSODY  ", "queen")
        );
        assert_eq!(match_key("Song", "Artist"), "song|artist");
        assert_ne!(match_key("Song", "Artist"), match_key("Song (Live)", "Artist"));
    }

    #[test]
    fn test_durations_match() {
        assert!(durations_match(Some(240), Some(243), 5));
        assert!(durations_match(Some(240), Some(237), 5));
        assert!(durations_match(Some(240), Some(245), 5));
        assert!(!durations_match(Some(240), Some(246), 5));
        assert!(!durations_match(Some(240), Some(230), 5));
    }

    #[test]
    fn test_durations_match_absent() {
        assert!(durations_match(None, Some(240), DEFAULT_DURATION_TOLERANCE_SECS));
        assert!(durations_match(Some(240), None, DEFAULT_DURATION_TOLERANCE_SECS));
        assert!(durations_match(None, None, 0));
    }

    #[test]
    fn test_albums_match() {
        assert!(albums_match(Some("Abbey Road"), Some("abbey road")));
        assert!(albums_match(Some("Abbey  Road "), Some("ABBEY ROAD")));
        assert!(!albums_match(Some("Abbey Road"), Some("Let It Be")));
        assert!(albums_match(None, Some("Album")));
        assert!(albums_match(Some("Album"), None));
        assert!(albums_match(Some(""), Some("Album")));
    }
}
