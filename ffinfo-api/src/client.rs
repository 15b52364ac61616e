use std::env;
use std::time::Duration;

use anyhow::Context as _;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::error::{ApiError, OutfitError};
use crate::model::PlayerInfo;

pub const DEFAULT_INFO_URL: &str = "https://ff-info-nine.vercel.app/info";
pub const DEFAULT_OUTFIT_URL: &str = "https://profile.thug4ff.com/api/profile";
pub const DEFAULT_PROFILE_CARD_URL: &str = "https://profile.thug4ff.com/api/profile_card";

pub const INFO_TIMEOUT: Duration = Duration::from_secs(10);
pub const OUTFIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Generated outfit image ready to be attached to a message.
#[derive(Clone, Debug)]
pub struct OutfitImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Json,
    Other,
}

/// Classify a `Content-Type` header value the way the outfit endpoint is
/// handled: images are attached, JSON carries a link, everything else is
/// rejected.
pub fn classify_content_type(content_type: &str) -> ContentKind {
    let lowered = content_type.to_ascii_lowercase();
    if lowered.contains("image") {
        ContentKind::Image
    } else if lowered.contains("application/json") {
        ContentKind::Json
    } else {
        ContentKind::Other
    }
}

/// Pull the image link out of an outfit JSON body (`image`, then `url`).
pub fn extract_image_link(body: &serde_json::Value) -> Option<String> {
    ["image", "url"]
        .iter()
        .filter_map(|key| body.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|link| !link.is_empty())
        .map(str::to_owned)
}

fn outfit_filename() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("outfit_{}.png", &id[..8])
}

#[derive(Clone, Debug)]
pub struct FreeFireClient {
    http: reqwest::Client,
    info_url: String,
    outfit_url: String,
    profile_card_url: String,
    info_timeout: Duration,
    outfit_timeout: Duration,
}

impl FreeFireClient {
    pub fn new(
        info_url: impl Into<String>,
        outfit_url: impl Into<String>,
        profile_card_url: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ffinfo-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            info_url: info_url.into(),
            outfit_url: outfit_url.into(),
            profile_card_url: profile_card_url.into(),
            info_timeout: INFO_TIMEOUT,
            outfit_timeout: OUTFIT_TIMEOUT,
        })
    }

    /// Override the per-request timeouts (player info, outfit image and its link).
    pub fn with_timeouts(mut self, info: Duration, outfit: Duration) -> Self {
        self.info_timeout = info;
        self.outfit_timeout = outfit;
        self
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(
            env_url("FF_INFO_API_URL", DEFAULT_INFO_URL),
            env_url("FF_OUTFIT_API_URL", DEFAULT_OUTFIT_URL),
            env_url("FF_PROFILE_CARD_URL", DEFAULT_PROFILE_CARD_URL),
        )
    }

    /// Thumbnail URL for a player's profile card.
    pub fn profile_card_url(&self, uid: &str) -> String {
        format!("{}?uid={}", self.profile_card_url, uid)
    }

    pub async fn fetch_player(&self, uid: &str) -> Result<PlayerInfo, ApiError> {
        let response = self
            .http
            .get(&self.info_url)
            .query(&[("uid", uid)])
            .timeout(self.info_timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(ApiError::NotFound {
                    uid: uid.to_owned(),
                });
            }
            status => {
                warn!(uid, status = status.as_u16(), "player info api returned an error status");
                return Err(ApiError::Status {
                    status: status.as_u16(),
                });
            }
        }

        let body = response.bytes().await?;
        let info = serde_json::from_slice::<PlayerInfo>(&body)?;
        debug!(uid, bytes = body.len(), "player info fetched");
        Ok(info)
    }

    /// Fetch the generated outfit image, following a JSON link response when
    /// the endpoint does not return the image directly.
    pub async fn fetch_outfit(&self, uid: &str) -> Result<OutfitImage, OutfitError> {
        let response = self
            .http
            .get(&self.outfit_url)
            .query(&[("uid", uid)])
            .timeout(self.outfit_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(OutfitError::Status {
                status: response.status().as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        match classify_content_type(&content_type) {
            ContentKind::Image => {
                let bytes = response.bytes().await?;
                Ok(OutfitImage {
                    filename: outfit_filename(),
                    bytes: bytes.to_vec(),
                })
            }
            ContentKind::Json => {
                let body = response.bytes().await?;
                let parsed = serde_json::from_slice::<serde_json::Value>(&body)?;
                let link = extract_image_link(&parsed).ok_or(OutfitError::MissingLink)?;
                self.fetch_linked_image(&link).await
            }
            ContentKind::Other => Err(OutfitError::UnexpectedFormat { content_type }),
        }
    }

    async fn fetch_linked_image(&self, link: &str) -> Result<OutfitImage, OutfitError> {
        debug!(link, "following outfit image link");
        let response = self.http.get(link).timeout(self.outfit_timeout).send().await?;

        if response.status() != StatusCode::OK {
            return Err(OutfitError::LinkUnreachable {
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(OutfitImage {
            filename: outfit_filename(),
            bytes: bytes.to_vec(),
        })
    }
}

fn env_url(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}
