use std::sync::LazyLock;

use regex::Regex;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

static ARTIST_DASH_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*[-\x{2013}\x{2014}]\s*(.+)$").expect("dash title pattern is valid")
});

static TITLE_BY_ARTIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+by\s+(.+)$").expect("by title pattern is valid")
});

static ARTIST_COLON_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*:\s*(.+)$").expect("colon title pattern is valid")
});

static ISO8601_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("duration pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVideoTitle {
    pub title: String,
    pub artist: String,
}

/// Split a video title into song title and artist.
///
/// Tried in order:
/// - `Artist - Title` (hyphen, en dash or em dash)
/// - `Title by Artist`
/// - `Artist: Title`
///
/// Anything else keeps the whole string as the title with an unknown artist.
pub fn parse_video_title(video_title: &str) -> ParsedVideoTitle {
    if let Some(caps) = ARTIST_DASH_TITLE.captures(video_title) {
        return ParsedVideoTitle {
            artist: caps[1].trim().to_string(),
            title: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = TITLE_BY_ARTIST.captures(video_title) {
        return ParsedVideoTitle {
            title: caps[1].trim().to_string(),
            artist: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = ARTIST_COLON_TITLE.captures(video_title) {
        return ParsedVideoTitle {
            artist: caps[1].trim().to_string(),
            title: caps[2].trim().to_string(),
        };
    }

    ParsedVideoTitle {
        title: video_title.trim().to_string(),
        artist: UNKNOWN_ARTIST.to_string(),
    }
}

/// Parse an ISO 8601 duration such as `PT4M13S` into seconds.
///
/// Returns `None` for anything unparsable and for zero-length durations, which
/// YouTube reports (`P0D`) for live streams and premieres.
pub fn parse_iso8601_duration(duration: &str) -> Option<u32> {
    let caps = ISO8601_DURATION.captures(duration.trim())?;
    let part = |i: usize| -> Option<u32> {
        caps.get(i)
            .map_or(Some(0), |m| m.as_str().parse::<u32>().ok())
    };

    let total = part(1)?
        .checked_mul(86_400)?
        .checked_add(part(2)?.checked_mul(3_600)?)?
        .checked_add(part(3)?.checked_mul(60)?)?
        .checked_add(part(4)?)?;

    (total > 0).then_some(total)
}
