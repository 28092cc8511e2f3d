//! Key-based join between two playlist snapshots.
//!
//! Tracks are grouped by [`match_key`] on each side, then the i-th occurrence
//! of a key on the left is paired with the i-th occurrence on the right.
//! Excess occurrences stay unmatched. Album and duration are checked for each
//! pair but never decide whether the pair is made.

use std::collections::HashMap;

use crate::domain::normalization::{
    DEFAULT_DURATION_TOLERANCE_SECS, albums_match, durations_match, match_key,
};
use crate::domain::types::{ComparisonResult, NormalizedTrack, PlaylistSnapshot, TrackPair};

/// Tracks grouped by match key, in first-seen key order.
///
/// Within a key, occurrences keep their playlist order.
#[derive(Debug, Default)]
pub struct MatchKeyGroups<'a> {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<&'a NormalizedTrack>)>,
}

impl<'a> MatchKeyGroups<'a> {
    pub fn push(&mut self, track: &'a NormalizedTrack) {
        let key = match_key(&track.title, &track.artist);
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].1.push(track),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![track]));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[&'a NormalizedTrack]> {
        self.index
            .get(key)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a NormalizedTrack])> {
        self.groups
            .iter()
            .map(|(key, tracks)| (key.as_str(), tracks.as_slice()))
    }

    /// Keys that occur more than once, with all their occurrences.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[&'a NormalizedTrack])> {
        self.iter().filter(|(_, tracks)| tracks.len() > 1)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group tracks by match key for duplicate detection
pub fn group_by_match_key(tracks: &[NormalizedTrack]) -> MatchKeyGroups<'_> {
    let mut groups = MatchKeyGroups::default();
    for track in tracks {
        groups.push(track);
    }
    groups
}

/// Outcome of the album/duration checks for a matched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryChecks {
    pub album_match: bool,
    pub duration_match: bool,
}

impl SecondaryChecks {
    pub fn passed(&self) -> bool {
        self.album_match && self.duration_match
    }
}

impl TrackPair {
    pub fn secondary_checks(&self, duration_tolerance_secs: u32) -> SecondaryChecks {
        SecondaryChecks {
            album_match: albums_match(self.left.album.as_deref(), self.right.album.as_deref()),
            duration_match: durations_match(
                self.left.duration_sec,
                self.right.duration_sec,
                duration_tolerance_secs,
            ),
        }
    }
}

impl ComparisonResult {
    /// Matched pairs whose album or duration disagree. Possibly different versions.
    pub fn weak_matches(&self, duration_tolerance_secs: u32) -> Vec<&TrackPair> {
        self.in_both
            .iter()
            .filter(|pair| !pair.secondary_checks(duration_tolerance_secs).passed())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    duration_tolerance_secs: u32,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_TOLERANCE_SECS)
    }
}

impl Comparator {
    pub fn new(duration_tolerance_secs: u32) -> Self {
        Self {
            duration_tolerance_secs,
        }
    }

    pub fn compare(&self, left: PlaylistSnapshot, right: PlaylistSnapshot) -> ComparisonResult {
        let (in_both, only_in_left, only_in_right) = self.partition(&left.tracks, &right.tracks);

        tracing::debug!(
            left = %left.name,
            right = %right.name,
            in_both = in_both.len(),
            only_in_left = only_in_left.len(),
            only_in_right = only_in_right.len(),
            "compared playlists"
        );

        ComparisonResult {
            left,
            right,
            only_in_left,
            only_in_right,
            in_both,
            manual_decisions: Vec::new(),
        }
    }

    fn partition(
        &self,
        left: &[NormalizedTrack],
        right: &[NormalizedTrack],
    ) -> (Vec<TrackPair>, Vec<NormalizedTrack>, Vec<NormalizedTrack>) {
        let left_groups = group_by_match_key(left);
        let right_groups = group_by_match_key(right);

        let mut in_both = Vec::new();
        let mut only_in_left = Vec::new();
        let mut only_in_right = Vec::new();

        for (key, left_tracks) in left_groups.iter() {
            let right_tracks = right_groups.get(key).unwrap_or_default();
            let paired = left_tracks.len().min(right_tracks.len());

            for (l, r) in left_tracks.iter().zip(right_tracks.iter()) {
                let pair = TrackPair {
                    left: (*l).clone(),
                    right: (*r).clone(),
                };
                // Computed for visibility only. A weak match is still a match.
                let checks = pair.secondary_checks(self.duration_tolerance_secs);
                if !checks.passed() {
                    tracing::debug!(
                        key,
                        album_match = checks.album_match,
                        duration_match = checks.duration_match,
                        "weak match"
                    );
                }
                in_both.push(pair);
            }

            only_in_left.extend(left_tracks[paired..].iter().map(|t| (*t).clone()));
        }

        for (key, right_tracks) in right_groups.iter() {
            let paired = left_groups
                .get(key)
                .map_or(0, |left_tracks| left_tracks.len().min(right_tracks.len()));
            only_in_right.extend(right_tracks[paired..].iter().map(|t| (*t).clone()));
        }

        (in_both, only_in_left, only_in_right)
    }
}

/// Compare two playlists using the default duration tolerance
pub fn compare(left: PlaylistSnapshot, right: PlaylistSnapshot) -> ComparisonResult {
    Comparator::default().compare(left, right)
}
