use color_eyre::eyre::Result;

use crate::domain::types::{PlaylistSnapshot, PlaylistSummary, Provider};
use crate::ports::youtube::YoutubeClient;
use crate::services::apple::AppleMusicService;
use crate::services::error::ImportError;
use crate::services::youtube::YoutubeImportService;

/// Routes listing and import requests to the right provider.
///
/// `youtube` is `None` when no access token was supplied; YouTube requests then
/// fail with [`ImportError::MissingAccessToken`].
pub struct PlaylistService<C: YoutubeClient> {
    youtube: Option<YoutubeImportService<C>>,
    apple: AppleMusicService,
}

impl<C: YoutubeClient> PlaylistService<C> {
    pub fn new(youtube: Option<YoutubeImportService<C>>) -> Self {
        Self {
            youtube,
            apple: AppleMusicService::new(),
        }
    }

    fn youtube(&self) -> Result<&YoutubeImportService<C>> {
        self.youtube.as_ref().ok_or_else(|| {
            ImportError::MissingAccessToken {
                provider: Provider::Youtube,
            }
            .into()
        })
    }

    pub async fn list_playlists(&self, provider: Provider) -> Result<Vec<PlaylistSummary>> {
        match provider {
            Provider::Youtube => {
                let playlists = self.youtube()?.list_playlists().await?;
                Ok(playlists
                    .into_iter()
                    .map(|p| PlaylistSummary {
                        provider: Provider::Youtube,
                        id: p.id,
                        title: p.title,
                        description: p.description,
                        item_count: p.item_count,
                    })
                    .collect())
            }
            Provider::Apple => self.apple.list_playlists().await,
        }
    }

    pub async fn import_playlist(
        &self,
        provider: Provider,
        playlist_id_or_url: &str,
    ) -> Result<PlaylistSnapshot> {
        match provider {
            Provider::Youtube => self.youtube()?.import_playlist(playlist_id_or_url).await,
            Provider::Apple => self.apple.import_playlist(playlist_id_or_url).await,
        }
    }
}
