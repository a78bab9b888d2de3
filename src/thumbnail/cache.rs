use super::render::render_thumbnail;
use crate::media::etag;

use chrono::{DateTime, Utc};
use log::{debug, info, trace};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct Thumbnail {
    pub data: Vec<u8>,
    pub etag: String,
    cache_time: DateTime<Utc>,
}

impl Thumbnail {
    /// Returns cache age in ms
    pub fn cache_age(&self) -> i64 {
        (Utc::now() - self.cache_time).num_milliseconds()
    }
}

/// Rendered thumbnails keyed by source file, dropped once older than the TTL.
pub struct ThumbnailCache {
    cache: HashMap<PathBuf, Thumbnail>,
    max_cache_age_ms: i64,
}

impl ThumbnailCache {
    pub async fn get(&mut self, file: &Path) -> Result<Thumbnail, anyhow::Error> {
        if let Some(cached) = self.cache.get(file) {
            if cached.cache_age() < self.max_cache_age_ms {
                trace!("Thumbnail cached, age {}", cached.cache_age());
                return Ok(cached.clone());
            }
        }

        trace!("Rendering thumbnail for {:?}", file);
        let data = tokio::fs::read(file).await?;
        let data = render_thumbnail(&data)?;
        let thumbnail = Thumbnail {
            etag: etag(&data),
            data,
            cache_time: Utc::now(),
        };

        self.cache.insert(file.to_owned(), thumbnail.clone());
        Ok(thumbnail)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn clean_cache(&mut self) {
        let before = self.cache.len();
        let max_age = self.max_cache_age_ms;
        self.cache.retain(|_, thumb| thumb.cache_age() <= max_age);

        let cleared = before - self.cache.len();
        if cleared > 0 {
            debug!("Cleaned {} thumbnails from cache.", cleared)
        }
    }
}

impl From<i64> for ThumbnailCache {
    fn from(cache_max_age: i64) -> Self {
        info!(
            "Initializing a thumbnail cache with a maximum TTL of {}ms",
            cache_max_age
        );

        Self {
            cache: HashMap::new(),
            max_cache_age_ms: cache_max_age,
        }
    }
}

pub async fn cache_cleanup(cache: Arc<Mutex<ThumbnailCache>>) {
    use tokio::time::{Duration, sleep};
    debug!("Beginning thumbnail cache clean up task");
    loop {
        sleep(Duration::from_secs(60)).await;
        cache.lock().await.clean_cache();
    }
}
