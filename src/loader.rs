use crate::discovery::{DiscoveryOptions, discover};
use crate::source::TripSource;
use crate::trip::{Trip, TripConfig};

use log::{debug, warn};

/// Loads one trip. Failures are logged and reported as `None`.
pub async fn load_trip<S: TripSource>(
    source: &S,
    config: &TripConfig,
    folder: &str,
    options: &DiscoveryOptions,
) -> Option<Trip> {
    let meta = match source.fetch_meta(folder).await {
        Ok(meta) => meta,
        Err(e) => {
            warn!("Error loading trip {}: {}", folder, e);
            return None;
        }
    };

    let images = match meta.declared_images() {
        Some(declared) => declared
            .iter()
            .map(|file| config.resolve(folder, file))
            .collect(),
        None => discover(source, config, folder, meta.cover.as_deref(), options).await,
    };

    debug!("Loaded trip {} with {} images", folder, images.len());

    Some(Trip {
        folder: folder.to_owned(),
        meta,
        images,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::source::SourceError;
    use crate::trip::TripMeta;
    use std::collections::HashMap;
    use std::time::Duration;

    /// In-memory source with per-trip latency.
    #[derive(Default)]
    pub(crate) struct MemorySource {
        pub metas: HashMap<String, TripMeta>,
        pub delays: HashMap<String, u64>,
        pub files: Vec<String>,
        pub down: bool,
    }

    impl MemorySource {
        pub fn with_trip(mut self, folder: &str, meta: TripMeta) -> Self {
            self.metas.insert(folder.to_owned(), meta);
            self
        }

        pub fn with_delay(mut self, folder: &str, ms: u64) -> Self {
            self.delays.insert(folder.to_owned(), ms);
            self
        }
    }

    impl TripSource for MemorySource {
        async fn ready(&self) -> Result<(), SourceError> {
            if self.down {
                return Err(SourceError::Unavailable("trips".into()));
            }
            Ok(())
        }

        async fn fetch_meta(&self, folder: &str) -> Result<TripMeta, SourceError> {
            if let Some(ms) = self.delays.get(folder) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.metas
                .get(folder)
                .cloned()
                .ok_or_else(|| SourceError::Unavailable(folder.into()))
        }

        async fn exists(&self, path: &str) -> bool {
            self.files.iter().any(|f| f == path)
        }

        async fn list_images(&self, _folder: &str) -> Option<Vec<String>> {
            None
        }
    }

    pub(crate) fn meta(name: &str, images: Option<&[&str]>) -> TripMeta {
        TripMeta {
            trip_name: name.to_owned(),
            date: "March 2024".to_owned(),
            members: vec!["Asha".to_owned(), "Kiran".to_owned()],
            cover: Some("cover.jpg".to_owned()),
            images: images.map(|list| list.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn config() -> TripConfig {
        TripConfig::new("base", vec!["id".to_owned()])
    }

    #[tokio::test]
    async fn test_explicit_list_is_authoritative() {
        let source = MemorySource {
            files: vec!["base/id/img1.jpg".to_owned()],
            ..Default::default()
        }
        .with_trip("id", meta("Trip", Some(&["a.jpg", "b.jpg"])));

        let trip = load_trip(&source, &config(), "id", &DiscoveryOptions::default())
            .await
            .unwrap();
        assert_eq!(trip.images, vec!["base/id/a.jpg", "base/id/b.jpg"]);
    }

    #[tokio::test]
    async fn test_discovery_starts_with_cover() {
        let source = MemorySource {
            files: vec!["base/id/img1.jpg".to_owned()],
            ..Default::default()
        }
        .with_trip("id", meta("Trip", None));

        let trip = load_trip(&source, &config(), "id", &DiscoveryOptions::default())
            .await
            .unwrap();
        assert_eq!(trip.images, vec!["base/id/cover.jpg", "base/id/img1.jpg"]);
    }

    #[tokio::test]
    async fn test_failed_meta_is_none() {
        let source = MemorySource::default();
        assert!(
            load_trip(&source, &config(), "id", &DiscoveryOptions::default())
                .await
                .is_none()
        );
    }
}
