use chrono::{TimeZone, Utc};

use crate::domain::types::{NormalizedTrack, PlaylistSnapshot, Provider};

pub fn track(title: &str, artist: &str) -> NormalizedTrack {
    NormalizedTrack {
        title: title.to_string(),
        artist: artist.to_string(),
        album: None,
        duration_sec: None,
        provider: Provider::Youtube,
        provider_track_id: Some(format!("youtube-{}", title)),
        provider_playlist_item_id: None,
    }
}

pub fn track_with(
    title: &str,
    artist: &str,
    album: Option<&str>,
    duration_sec: Option<u32>,
    provider_track_id: &str,
) -> NormalizedTrack {
    NormalizedTrack {
        album: album.map(str::to_string),
        duration_sec,
        provider_track_id: Some(provider_track_id.to_string()),
        ..track(title, artist)
    }
}

pub fn snapshot(name: &str, tracks: Vec<NormalizedTrack>) -> PlaylistSnapshot {
    PlaylistSnapshot {
        provider: Provider::Youtube,
        playlist_id_or_url: format!("youtube-{}", name.to_lowercase()),
        name: name.to_string(),
        fetched_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        tracks,
    }
}
