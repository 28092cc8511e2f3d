use color_eyre::eyre::Result;

use crate::domain::types::{PlaylistSnapshot, PlaylistSummary, Provider};
use crate::services::error::ImportError;

/// Apple Music has no account listing; playlists are imported by URL only.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppleMusicService;

impl AppleMusicService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        tracing::info!("Apple Music import requires a playlist URL");
        Ok(Vec::new())
    }

    pub async fn import_playlist(&self, playlist_url: &str) -> Result<PlaylistSnapshot> {
        tracing::debug!(playlist_url, "Apple Music import requested");
        Err(ImportError::NotImplemented {
            provider: Provider::Apple,
        }
        .into())
    }
}
