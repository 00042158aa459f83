//! Optional `m=<mtime>` cache-busting parameter for rewritten asset URLs.

use chrono::{DateTime, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use crate::infrastructure::cache::CacheService;
use crate::utils::asset_url::{AssetUrl, set_query_param};

/// Cache key namespace for file modification times.
pub const MTIMES_KEY: &str = "mtimes";
/// Lifetime of a cached "now" placeholder when no file was found.
pub const MISSING_FILE_TTL_SECONDS: u64 = 900;
/// Lifetime of a cached modification time read from disk.
pub const FOUND_FILE_TTL_SECONDS: u64 = 86_400;

/// Paths that end in a `name.ext` file name.
static FILE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[A-Z0-9\-_]+\.[A-Z0-9]+$").unwrap());

/// Appends a query parameter carrying the asset's last-modified time.
///
/// The URL path is mapped onto `document_root`; the timestamp is cached by a
/// hash of the path so disks are not hit on every request.
pub struct CacheBuster {
    document_root: PathBuf,
    cache: Arc<dyn CacheService>,
}

impl CacheBuster {
    pub fn new(document_root: PathBuf, cache: Arc<dyn CacheService>) -> Self {
        Self {
            document_root,
            cache,
        }
    }

    /// Returns `url` with `m=<mtime>` added, or unchanged when its path does
    /// not name a file.
    pub async fn apply(&self, url: &str) -> String {
        let Ok(asset) = AssetUrl::parse(url) else {
            return url.to_string();
        };
        let path = asset.path();

        if !FILE_NAME_REGEX.is_match(path) {
            return url.to_string();
        }

        let mtime = self.mtime(path).await;
        set_query_param(url, "m", &mtime.to_string())
    }

    async fn mtime(&self, path: &str) -> i64 {
        let key = mtime_key(path);

        if let Ok(Some(cached)) = self.cache.get(&key).await
            && let Ok(mtime) = cached.parse::<i64>()
            && mtime > 0
        {
            return mtime;
        }

        let (mtime, ttl) = match self.file_mtime(path).await {
            Some(mtime) => (mtime, FOUND_FILE_TTL_SECONDS),
            None => (Utc::now().timestamp(), MISSING_FILE_TTL_SECONDS),
        };

        if let Err(e) = self.cache.set(&key, &mtime.to_string(), ttl).await {
            warn!("Failed to cache mtime for {}: {}", path, e);
        }

        mtime
    }

    async fn file_mtime(&self, path: &str) -> Option<i64> {
        let relative = Path::new(path.trim_start_matches('/'));

        let escapes_root = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.as_os_str().is_empty() || escapes_root {
            return None;
        }

        let full = self.document_root.join(relative);
        let metadata = tokio::fs::metadata(&full).await.ok()?;
        if !metadata.is_file() {
            return None;
        }

        let modified = metadata.modified().ok()?;
        let mtime = DateTime::<Utc>::from(modified).timestamp();
        debug!("mtime {} for {}", mtime, full.display());
        Some(mtime)
    }
}

pub(crate) fn mtime_key(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(MTIMES_KEY.as_bytes());
    hasher.update(path.as_bytes());
    format!("{}:{}", MTIMES_KEY, hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::MemoryCache;
    use std::time::Duration;

    fn buster(root: &Path, cache: Arc<MemoryCache>) -> CacheBuster {
        CacheBuster::new(root.to_path_buf(), cache)
    }

    #[tokio::test]
    async fn test_existing_file_uses_mtime() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("wp-content")).unwrap();
        let file = dir.path().join("wp-content/app.js");
        std::fs::write(&file, "console.log(1)").unwrap();
        let expected =
            DateTime::<Utc>::from(std::fs::metadata(&file).unwrap().modified().unwrap())
                .timestamp();

        let cache = Arc::new(MemoryCache::new());
        let result = buster(dir.path(), cache.clone())
            .apply("https://s.example.com/wp-content/app.js?ver=1")
            .await;

        assert_eq!(
            result,
            format!("https://s.example.com/wp-content/app.js?ver=1&m={}", expected)
        );
        let left = cache.expires_in(&mtime_key("/wp-content/app.js")).await.unwrap();
        assert!(left > Duration::from_secs(MISSING_FILE_TTL_SECONDS));
    }

    #[tokio::test]
    async fn test_missing_file_caches_now_briefly() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Arc::new(MemoryCache::new());

        let before = Utc::now().timestamp();
        let result = buster(dir.path(), cache.clone())
            .apply("https://s.example.com/missing.css")
            .await;

        let mtime: i64 = result.rsplit("m=").next().unwrap().parse().unwrap();
        assert!(mtime >= before);
        let left = cache.expires_in(&mtime_key("/missing.css")).await.unwrap();
        assert!(left <= Duration::from_secs(MISSING_FILE_TTL_SECONDS));
    }

    #[tokio::test]
    async fn test_cached_value_wins() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Arc::new(MemoryCache::new());
        cache
            .set(&mtime_key("/theme/style.css"), "12345", 60)
            .await
            .unwrap();

        let result = buster(dir.path(), cache)
            .apply("https://s.example.com/theme/style.css#x")
            .await;

        assert_eq!(result, "https://s.example.com/theme/style.css?m=12345#x");
    }

    #[tokio::test]
    async fn test_directories_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Arc::new(MemoryCache::new());

        let result = buster(dir.path(), cache.clone())
            .apply("https://s.example.com/wp-content/themes/twenty")
            .await;

        assert_eq!(result, "https://s.example.com/wp-content/themes/twenty");
        assert!(cache.is_empty().await);
    }

    #[test]
    fn test_mtime_key_is_stable() {
        assert_eq!(mtime_key("/a.js"), mtime_key("/a.js"));
        assert_ne!(mtime_key("/a.js"), mtime_key("/b.js"));
        assert!(mtime_key("/a.js").starts_with("mtimes:"));
    }
}
