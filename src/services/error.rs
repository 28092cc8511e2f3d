use crate::domain::types::Provider;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("{provider} import is not implemented yet")]
    NotImplemented { provider: Provider },

    #[error("Playlist {playlist_id} not found")]
    PlaylistNotFound { playlist_id: String },

    #[error("No access token for {provider}. Pass --access-token or set the provider's token variable")]
    MissingAccessToken { provider: Provider },
}
