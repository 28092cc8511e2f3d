use std::collections::{HashMap, HashSet};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr};
use tracing::instrument;

use crate::domain::types::{NormalizedTrack, PlaylistSnapshot, Provider};
use crate::ports::youtube::{YoutubeApiPlaylist, YoutubeApiPlaylistItem, YoutubeClient};
use crate::services::error::ImportError;
use crate::services::youtube::title::{parse_iso8601_duration, parse_video_title};
use crate::youtube_rs::MAX_RESULTS;

pub const UNTITLED_PLAYLIST: &str = "Untitled Playlist";

/// Titles YouTube substitutes for entries the viewer can no longer watch.
const UNAVAILABLE_VIDEO_TITLES: [&str; 2] = ["Private video", "Deleted video"];

pub struct YoutubeImportService<C: YoutubeClient> {
    client: C,
}

impl<C: YoutubeClient> YoutubeImportService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// All of the token owner's playlists, sorted by title.
    pub async fn list_playlists(&self) -> Result<Vec<YoutubeApiPlaylist>> {
        let mut playlists = Vec::new();
        let mut page_token = None;

        loop {
            let page = self
                .client
                .my_playlists_page(page_token)
                .await
                .wrap_err("Failed to list YouTube playlists")?;
            playlists.extend(page.items);

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        playlists.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(playlists)
    }

    /// Fetch every item of a playlist and capture it as a snapshot.
    #[instrument(skip(self))]
    pub async fn import_playlist(&self, playlist_id: &str) -> Result<PlaylistSnapshot> {
        let playlist = self
            .client
            .playlist(playlist_id)
            .await
            .wrap_err("Failed to fetch YouTube playlist")?
            .ok_or_else(|| ImportError::PlaylistNotFound {
                playlist_id: playlist_id.to_string(),
            })?;

        let name = if playlist.title.trim().is_empty() {
            UNTITLED_PLAYLIST.to_string()
        } else {
            playlist.title
        };

        let items = self.fetch_all_items(playlist_id).await?;
        // One lookup per video, however often it repeats in the playlist.
        let mut seen = HashSet::new();
        let video_ids: Vec<String> = items
            .iter()
            .filter_map(|i| i.video_id.clone())
            .filter(|id| seen.insert(id.clone()))
            .collect();
        let durations = self.fetch_durations(&video_ids).await;

        let tracks: Vec<NormalizedTrack> = items
            .into_iter()
            .map(|item| {
                let parsed = parse_video_title(&item.title);
                let duration_sec = item
                    .video_id
                    .as_ref()
                    .and_then(|id| durations.get(id))
                    .and_then(|d| parse_iso8601_duration(d));

                NormalizedTrack {
                    title: parsed.title,
                    artist: parsed.artist,
                    album: None,
                    duration_sec,
                    provider: Provider::Youtube,
                    provider_track_id: item.video_id,
                    provider_playlist_item_id: item.item_id,
                }
            })
            .collect();

        tracing::info!(playlist = %name, tracks = tracks.len(), "Imported YouTube playlist");

        Ok(PlaylistSnapshot {
            provider: Provider::Youtube,
            playlist_id_or_url: playlist_id.to_string(),
            name,
            fetched_at: Utc::now(),
            tracks,
        })
    }

    async fn fetch_all_items(&self, playlist_id: &str) -> Result<Vec<YoutubeApiPlaylistItem>> {
        let mut items = Vec::new();
        let mut page_token = None;

        loop {
            let page = self
                .client
                .playlist_items_page(playlist_id, page_token)
                .await
                .wrap_err("Failed to fetch YouTube playlist items")?;

            for item in page.items {
                if UNAVAILABLE_VIDEO_TITLES.contains(&item.title.as_str()) {
                    tracing::debug!(item_id = ?item.item_id, "Skipping unavailable video");
                    continue;
                }
                items.push(item);
            }

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(items)
    }

    /// Durations are best effort: a failed batch leaves those tracks without one.
    async fn fetch_durations(&self, video_ids: &[String]) -> HashMap<String, String> {
        let mut durations = HashMap::new();

        for batch in video_ids.chunks(MAX_RESULTS) {
            match self.client.video_durations(batch.to_vec()).await {
                Ok(found) => durations.extend(found),
                Err(e) => tracing::warn!(
                    error = ?e,
                    videos = batch.len(),
                    "Failed to get durations for YouTube videos"
                ),
            }
        }

        durations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::youtube::{MockYoutubeClient, YoutubeApiPage};

    fn item(item_id: &str, title: &str, video_id: Option<&str>) -> YoutubeApiPlaylistItem {
        YoutubeApiPlaylistItem {
            item_id: Some(item_id.into()),
            title: title.into(),
            video_id: video_id.map(str::to_string),
        }
    }

    fn playlist(id: &str, title: &str) -> YoutubeApiPlaylist {
        YoutubeApiPlaylist {
            id: id.into(),
            title: title.into(),
            description: None,
            item_count: None,
        }
    }

    #[tokio::test]
    async fn test_list_playlists_follows_pages_and_sorts() {
        let mut client = MockYoutubeClient::new();
        client
            .expect_my_playlists_page()
            .withf(|token| token.is_none())
            .times(1)
            .returning(|_| {
                Ok(YoutubeApiPage {
                    items: vec![playlist("PL2", "Workout")],
                    next_page_token: Some("page-2".into()),
                })
            });
        client
            .expect_my_playlists_page()
            .withf(|token| token.as_deref() == Some("page-2"))
            .times(1)
            .returning(|_| {
                Ok(YoutubeApiPage {
                    items: vec![playlist("PL1", "Chill")],
                    next_page_token: None,
                })
            });

        let service = YoutubeImportService::new(client);
        let playlists = service.list_playlists().await.unwrap();

        let titles: Vec<_> = playlists.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Chill", "Workout"]);
    }

    #[tokio::test]
    async fn test_import_playlist() {
        let mut client = MockYoutubeClient::new();
        client
            .expect_playlist()
            .returning(|id| Ok(Some(playlist(id, "Road Trip"))));
        client
            .expect_playlist_items_page()
            .withf(|_, token| token.is_none())
            .returning(|_, _| {
                Ok(YoutubeApiPage {
                    items: vec![
                        item("i1", "Queen - Bohemian Rhapsody", Some("v1")),
                        item("i2", "Private video", Some("v2")),
                    ],
                    next_page_token: Some("next".into()),
                })
            });
        client
            .expect_playlist_items_page()
            .withf(|_, token| token.as_deref() == Some("next"))
            .returning(|_, _| {
                Ok(YoutubeApiPage {
                    items: vec![
                        item("i3", "Deleted video", None),
                        item("i4", "Creep by Radiohead", Some("v4")),
                        item("i5", "Queen - Bohemian Rhapsody", Some("v1")),
                    ],
                    next_page_token: None,
                })
            });
        client
            .expect_video_durations()
            .withf(|ids| ids == &vec!["v1".to_string(), "v4".to_string()])
            .times(1)
            .returning(|_| {
                Ok(HashMap::from([
                    ("v1".to_string(), "PT5M55S".to_string()),
                    ("v4".to_string(), "P0D".to_string()),
                ]))
            });

        let service = YoutubeImportService::new(client);
        let snapshot = service.import_playlist("PL123").await.unwrap();

        assert_eq!(snapshot.provider, Provider::Youtube);
        assert_eq!(snapshot.playlist_id_or_url, "PL123");
        assert_eq!(snapshot.name, "Road Trip");
        assert_eq!(snapshot.tracks.len(), 3);

        let first = &snapshot.tracks[0];
        assert_eq!(first.title, "Bohemian Rhapsody");
        assert_eq!(first.artist, "Queen");
        assert_eq!(first.album, None);
        assert_eq!(first.duration_sec, Some(355));
        assert_eq!(first.provider_track_id.as_deref(), Some("v1"));
        assert_eq!(first.provider_playlist_item_id.as_deref(), Some("i1"));

        let second = &snapshot.tracks[1];
        assert_eq!(second.title, "Creep");
        assert_eq!(second.artist, "Radiohead");
        assert_eq!(second.duration_sec, None);

        // Same video twice keeps both entries, told apart by item id.
        assert_eq!(snapshot.tracks[2].provider_playlist_item_id.as_deref(), Some("i5"));
        assert_eq!(snapshot.tracks[2].duration_sec, Some(355));
    }

    #[tokio::test]
    async fn test_import_playlist_not_found() {
        let mut client = MockYoutubeClient::new();
        client.expect_playlist().returning(|_| Ok(None));

        let service = YoutubeImportService::new(client);
        let err = service.import_playlist("missing").await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<ImportError>(),
            Some(&ImportError::PlaylistNotFound {
                playlist_id: "missing".into()
            })
        );
    }

    #[tokio::test]
    async fn test_import_playlist_untitled_and_duration_failure() {
        let mut client = MockYoutubeClient::new();
        client
            .expect_playlist()
            .returning(|id| Ok(Some(playlist(id, ""))));
        client.expect_playlist_items_page().returning(|_, _| {
            Ok(YoutubeApiPage {
                items: vec![item("i1", "Untitled Jam", Some("v1"))],
                next_page_token: None,
            })
        });
        client
            .expect_video_durations()
            .returning(|_| Err(color_eyre::eyre::eyre!("quota exceeded")));

        let service = YoutubeImportService::new(client);
        let snapshot = service.import_playlist("PL1").await.unwrap();

        assert_eq!(snapshot.name, UNTITLED_PLAYLIST);
        assert_eq!(snapshot.tracks.len(), 1);
        assert_eq!(snapshot.tracks[0].artist, "Unknown Artist");
        assert_eq!(snapshot.tracks[0].duration_sec, None);
    }

    #[tokio::test]
    async fn test_import_playlist_batches_durations() {
        let items: Vec<_> = (0..120)
            .map(|i| item(&format!("i{i}"), &format!("Artist - Song {i}"), Some(&format!("v{i}"))))
            .collect();

        let mut client = MockYoutubeClient::new();
        client
            .expect_playlist()
            .returning(|id| Ok(Some(playlist(id, "Big"))));
        client.expect_playlist_items_page().returning(move |_, _| {
            Ok(YoutubeApiPage {
                items: items.clone(),
                next_page_token: None,
            })
        });
        client
            .expect_video_durations()
            .withf(|ids| ids.len() <= MAX_RESULTS)
            .times(3)
            .returning(|ids| {
                Ok(ids
                    .into_iter()
                    .map(|id| (id, "PT3M".to_string()))
                    .collect())
            });

        let service = YoutubeImportService::new(client);
        let snapshot = service.import_playlist("PL-big").await.unwrap();

        assert_eq!(snapshot.tracks.len(), 120);
        assert!(snapshot.tracks.iter().all(|t| t.duration_sec == Some(180)));
    }
}
