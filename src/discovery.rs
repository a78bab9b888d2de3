//! Best-effort image discovery for trips whose metadata declares no image list.
//!
//! A source that can list its folders is asked for a listing. Otherwise, when
//! probing is enabled, a fixed vocabulary of file names is checked one path at
//! a time. Neither path is ever fatal: the worst outcome is an empty gallery.

use crate::source::{IMAGE_EXTENSIONS, TripSource};
use crate::trip::TripConfig;

use futures::{StreamExt, stream};
use log::debug;
use std::collections::HashSet;

pub const NUMBERED_LIMIT: u32 = 50;
pub const NAMED_LIMIT: u32 = 10;
pub const COMMON_NAMES: [&str; 6] = ["beach", "mountain", "sunset", "landscape", "photo", "image"];

#[derive(Clone, Debug)]
pub struct DiscoveryOptions {
    pub probe_fallback: bool,
    pub probe_concurrency: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            probe_fallback: true,
            probe_concurrency: 8,
        }
    }
}

/// File names probed when listing is unavailable, in probe order.
pub fn probe_candidates() -> Vec<String> {
    let numbered = (1..=NUMBERED_LIMIT).flat_map(|i| {
        IMAGE_EXTENSIONS
            .iter()
            .map(move |ext| format!("img{}.{}", i, ext))
    });

    let named = COMMON_NAMES.iter().flat_map(|name| {
        (1..=NAMED_LIMIT).flat_map(move |i| {
            IMAGE_EXTENSIONS
                .iter()
                .map(move |ext| format!("{}{}.{}", name, i, ext))
        })
    });

    numbered.chain(named).collect()
}

pub async fn discover<S: TripSource>(
    source: &S,
    config: &TripConfig,
    folder: &str,
    cover: Option<&str>,
    options: &DiscoveryOptions,
) -> Vec<String> {
    let mut images = Vec::new();

    if let Some(cover) = cover.filter(|c| !c.is_empty()) {
        images.push(config.resolve(folder, cover));
    }

    if let Some(listed) = source.list_images(folder).await {
        images.extend(listed.iter().map(|file| config.resolve(folder, file)));
    } else if options.probe_fallback {
        images.extend(probe(source, config, folder, options.probe_concurrency).await);
    } else {
        debug!("Trip {} has no image list and probing is disabled", folder);
    }

    dedup(images)
}

async fn probe<S: TripSource>(
    source: &S,
    config: &TripConfig,
    folder: &str,
    concurrency: usize,
) -> Vec<String> {
    let candidates = probe_candidates();
    debug!("Probing {} candidate images for {}", candidates.len(), folder);

    stream::iter(candidates)
        .map(|file| {
            let path = config.resolve(folder, &file);
            async move { source.exists(&path).await.then_some(path) }
        })
        .buffered(concurrency.max(1))
        .filter_map(|found| async move { found })
        .collect()
        .await
}

/// Keeps the first occurrence of each path.
fn dedup(mut images: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    images.retain(|path| seen.insert(path.clone()));
    images
}
