//! Remote picture loader
//!
//! Downloads a picture, keeps the raw bytes in the disk cache and
//! returns RGBA pixels cropped to fill the card's image area.

use image::imageops::FilterType;
use std::time::Duration;
use thiserror::Error;
use tokio::task;

use super::cache::ImageCache;
use crate::config::Settings;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("task join error: {0}")]
    Join(#[from] task::JoinError),
    #[error("no HTTP client available")]
    NoClient,
}

/// Decoded picture ready for display
#[derive(Clone)]
pub struct FetchedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for FetchedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Build the HTTP client used for every picture download
pub fn create_client(settings: &Settings) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .user_agent(concat!("picture-gallery/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Load a picture from the cache or the network and crop it to `width` x `height`
pub async fn fetch_image(
    client: Option<reqwest::Client>,
    cache: Option<ImageCache>,
    url: String,
    width: u32,
    height: u32,
) -> Result<FetchedImage, FetchError> {
    let cached = match &cache {
        Some(cache) => cache.get(&url).await,
        None => None,
    };

    let bytes = match cached {
        Some(bytes) => {
            tracing::debug!(%url, "image cache hit");
            bytes
        }
        None => {
            let client = client.ok_or(FetchError::NoClient)?;
            let bytes = download(&client, &url).await?;

            if let Some(cache) = &cache {
                if let Err(e) = cache.put(&url, &bytes).await {
                    tracing::warn!(%url, error = %e, "failed to cache image");
                }
            }
            bytes
        }
    };

    // Decoding is CPU-bound, keep it off the async workers
    task::spawn_blocking(move || crop_to_fill(&bytes, width, height)).await?
}

async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    tracing::debug!(%url, size = bytes.len(), "downloaded image");
    Ok(bytes.to_vec())
}

/// Decode encoded image bytes and scale/crop them to exactly `width` x `height`
pub fn crop_to_fill(bytes: &[u8], width: u32, height: u32) -> Result<FetchedImage, FetchError> {
    let img = image::load_from_memory(bytes)?;
    let filled = img.resize_to_fill(width, height, FilterType::Triangle).to_rgba8();

    Ok(FetchedImage {
        width: filled.width(),
        height: filled.height(),
        pixels: filled.into_raw(),
    })
}
