//! # vidnote-youtube
//!
//! Stateless YouTube collaborators consumed by the add-video flow:
//! extracting the 11-character video id from the URL shapes users
//! paste, and a best-effort title lookup against the noembed.com
//! oEmbed endpoint (no API key required).

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use vidnote_core::{Error, Result};

/// Default noembed endpoint.
pub const DEFAULT_NOEMBED_URL: &str = "https://noembed.com/embed";

/// Timeout for title lookups (seconds). Lookups are best-effort; a
/// slow provider should not stall the add flow.
pub const LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Matches watch, short, embed, v, shorts, and mobile URL shapes and
/// captures the 11-character video id.
static VIDEO_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?v=|embed/|v/|shorts/)|youtu\.be/)([\w-]{11})(?:[&?].*)?$",
    )
    .expect("video id pattern is valid")
});

/// Extract the YouTube video id from a URL, or `None` when the URL
/// matches no known shape.
pub fn extract_video_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    VIDEO_ID_PATTERN
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Whether a string is a recognizable YouTube URL.
pub fn is_valid_youtube_url(url: &str) -> bool {
    extract_video_id(url).is_some()
}

/// Best-effort video title lookup.
///
/// Implementations return `Ok(None)` when the provider has no title
/// for the id; transport failures surface as [`Error::Request`] and
/// are expected to be swallowed by the caller.
#[async_trait]
pub trait TitleProvider: Send + Sync {
    async fn fetch_title(&self, video_id: &str) -> Result<Option<String>>;
}

#[derive(Deserialize)]
struct NoembedResponse {
    title: Option<String>,
    error: Option<String>,
}

/// Title provider backed by the noembed.com oEmbed endpoint.
pub struct NoembedProvider {
    client: Client,
    base_url: String,
}

impl NoembedProvider {
    /// Create a provider against the default endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_NOEMBED_URL.to_string())
    }

    /// Create a provider against a custom endpoint (tests, proxies).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }
}

impl Default for NoembedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TitleProvider for NoembedProvider {
    async fn fetch_title(&self, video_id: &str) -> Result<Option<String>> {
        let url = format!(
            "{}?url=https://www.youtube.com/watch?v={}",
            self.base_url, video_id
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        let body: NoembedResponse = response
            .json()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if let Some(provider_error) = body.error {
            warn!(component = "youtube", video_id, error = %provider_error, "noembed error");
            return Ok(None);
        }
        debug!(component = "youtube", video_id, found = body.title.is_some(), "title lookup");
        Ok(body.title)
    }
}
