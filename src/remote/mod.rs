//! Remote picture loading
//!
//! This module handles:
//! - Downloading pictures over HTTP
//! - Caching downloaded bytes on disk
//! - Cropping decoded pictures to the card's aspect

pub mod cache;
pub mod fetch;

pub use cache::ImageCache;
pub use fetch::{fetch_image, FetchError, FetchedImage};
