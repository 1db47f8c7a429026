//! Imgur gallery client: fetch a subreddit gallery, pick one image at random.

use rand::seq::SliceRandom;
use serde::Deserialize;
use std::time::Duration;

const IMGUR_API_URL: &str = "https://api.imgur.com/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum ImgurError {
    /// Transport-level failure (connect, timeout, body read).
    Http(String),
    /// Non-success HTTP status from the API.
    Api(String),
    /// Response body was not the expected JSON shape.
    Parse(String),
    /// Gallery exists but currently lists no images.
    EmptyGallery(String),
}

impl std::fmt::Display for ImgurError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImgurError::Http(e) => write!(f, "HTTP error: {e}"),
            ImgurError::Api(e) => write!(f, "API error: {e}"),
            ImgurError::Parse(e) => write!(f, "Parse error: {e}"),
            ImgurError::EmptyGallery(g) => write!(f, "gallery '{g}' has no images this week"),
        }
    }
}

impl std::error::Error for ImgurError {}

/// One image entry in a subreddit gallery response. Only the fields the bot
/// cares about; Imgur sends many more.
#[derive(Debug, Deserialize)]
pub struct SubredditImage {
    pub id: String,
    pub link: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub nsfw: Option<bool>,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub is_album: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubredditGallery {
    pub data: Vec<SubredditImage>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: i32,
}

/// Imgur API client. Holds the Client-ID credential and a reqwest client
/// with a per-request timeout; no network traffic at construction.
pub struct ImgurClient {
    client_id: String,
    base_url: String,
    http: reqwest::Client,
}

impl ImgurClient {
    pub fn new(client_id: String) -> Self {
        Self::with_endpoint(client_id, IMGUR_API_URL.to_string(), REQUEST_TIMEOUT)
    }

    fn with_endpoint(client_id: String, base_url: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client_id,
            base_url,
            http,
        }
    }

    /// Fetch this week's gallery listing for a subreddit and return the raw
    /// response body. Transport failures and non-2xx statuses are errors for
    /// the caller to report; they never terminate the process.
    pub async fn fetch_gallery(&self, subreddit: &str) -> Result<Vec<u8>, ImgurError> {
        let url = format!("{}/gallery/r/{}/time/week/0", self.base_url, subreddit);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.client_id))
            .send()
            .await
            .map_err(|e| ImgurError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImgurError::Api(format!("{status}: {body}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImgurError::Http(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    /// Fetch a subreddit gallery and return the link of one image chosen
    /// uniformly at random. An empty gallery is an explicit error.
    pub async fn random_image(&self, subreddit: &str) -> Result<String, ImgurError> {
        let body = self.fetch_gallery(subreddit).await?;
        let gallery = parse_gallery(&body)?;

        gallery
            .data
            .choose(&mut rand::thread_rng())
            .map(|image| image.link.clone())
            .ok_or_else(|| ImgurError::EmptyGallery(subreddit.to_string()))
    }
}

/// Deserialize a gallery response body. Malformed JSON is a parse error,
/// not a zero-valued gallery.
pub fn parse_gallery(bytes: &[u8]) -> Result<SubredditGallery, ImgurError> {
    serde_json::from_slice(bytes).map_err(|e| ImgurError::Parse(e.to_string()))
}
