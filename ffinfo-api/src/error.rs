use thiserror::Error;

/// Failures of the player-info lookup, one variant per user-facing outcome.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("player `{uid}` was not found")]
    NotFound { uid: String },
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },
    #[error("request timed out")]
    Timeout,
    #[error("failed to decode response body")]
    Decode(#[from] serde_json::Error),
    #[error("request failed")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Failures of the outfit image fetch.
#[derive(Debug, Error)]
pub enum OutfitError {
    #[error("outfit endpoint returned HTTP {status}")]
    Status { status: u16 },
    #[error("outfit response carried no image link")]
    MissingLink,
    #[error("outfit image link returned HTTP {status}")]
    LinkUnreachable { status: u16 },
    #[error("unexpected outfit content type `{content_type}`")]
    UnexpectedFormat { content_type: String },
    #[error("outfit request timed out")]
    Timeout,
    #[error("failed to decode outfit response")]
    Decode(#[from] serde_json::Error),
    #[error("outfit request failed")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for OutfitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}
