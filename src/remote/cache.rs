use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// On-disk cache of downloaded image bytes, keyed by URL
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Use the given directory, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(ImageCache { dir })
    }

    /// Open the cache in the user cache directory.
    /// Returns None when no cache directory can be determined or created.
    pub fn open_default() -> Option<Self> {
        let dir = get_image_cache_dir()?;
        match ImageCache::new(&dir) {
            Ok(cache) => {
                tracing::info!(dir = %cache.dir().display(), "image cache ready");
                Some(cache)
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "image cache disabled");
                None
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the cache file path for a URL (doesn't check that it exists)
    pub fn path_for(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{:x}.img", digest))
    }

    /// Cached bytes for a URL, if present
    pub async fn get(&self, url: &str) -> Option<Vec<u8>> {
        tokio::fs::read(self.path_for(url)).await.ok()
    }

    pub async fn put(&self, url: &str, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::write(self.path_for(url), bytes).await
    }
}

/// Get the image cache directory
/// Returns ~/.cache/picture-gallery/images on Linux
pub fn get_image_cache_dir() -> Option<PathBuf> {
    let mut path = dirs_next::cache_dir().or_else(dirs_next::home_dir)?;
    path.push("picture-gallery");
    path.push("images");
    Some(path)
}
