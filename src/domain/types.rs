use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The service a playlist was imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Youtube,
    Apple,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Youtube => "youtube",
            Provider::Apple => "apple",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occurrence of a song inside a playlist.
///
/// `title` and `artist` keep the provider's original casing for display;
/// matching always goes through [`crate::domain::normalization::match_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTrack {
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u32>,
    pub provider: Provider,
    /// Provider-specific track id, carried through for export. Never a match key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_track_id: Option<String>,
    /// Distinguishes duplicate entries of the same song within one playlist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_playlist_item_id: Option<String>,
}

/// Point-in-time capture of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnapshot {
    pub provider: Provider,
    pub playlist_id_or_url: String,
    pub name: String,
    pub fetched_at: DateTime<Utc>,
    pub tracks: Vec<NormalizedTrack>,
}

/// A playlist that can be imported, as listed by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub provider: Provider,
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPair {
    pub left: NormalizedTrack,
    pub right: NormalizedTrack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTrackRef {
    pub provider: Provider,
    pub track_id: String,
}

/// A user override made during one comparison session. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDecision {
    pub key: String,
    pub left: DecisionTrackRef,
    pub right: DecisionTrackRef,
    pub matched: bool,
    pub decided_at: DateTime<Utc>,
}

impl MatchDecision {
    pub fn new(left: DecisionTrackRef, right: DecisionTrackRef, matched: bool) -> Self {
        Self {
            key: Self::key_for(&left, &right),
            left,
            right,
            matched,
            decided_at: Utc::now(),
        }
    }

    /// `leftProvider:leftId|rightProvider:rightId`
    pub fn key_for(left: &DecisionTrackRef, right: &DecisionTrackRef) -> String {
        format!(
            "{}:{}|{}:{}",
            left.provider, left.track_id, right.provider, right.track_id
        )
    }
}

/// The three-way partition of two snapshots.
///
/// Every track of `left` lands in exactly one of `only_in_left` or the left
/// side of one `in_both` pair, and symmetrically for `right`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub left: PlaylistSnapshot,
    pub right: PlaylistSnapshot,
    pub only_in_left: Vec<NormalizedTrack>,
    pub only_in_right: Vec<NormalizedTrack>,
    pub in_both: Vec<TrackPair>,
    #[serde(default)]
    pub manual_decisions: Vec<MatchDecision>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub left_total: usize,
    pub right_total: usize,
    pub only_in_left: usize,
    pub only_in_right: usize,
    pub in_both: usize,
}

impl ComparisonResult {
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            left_total: self.left.tracks.len(),
            right_total: self.right.tracks.len(),
            only_in_left: self.only_in_left.len(),
            only_in_right: self.only_in_right.len(),
            in_both: self.in_both.len(),
        }
    }
}
