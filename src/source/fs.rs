use super::{SourceError, TripSource, has_image_extension};
use crate::trip::{TripConfig, TripMeta};

use anyhow::anyhow;
use log::{debug, trace};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Trips stored on local disk under `root/{base}`.
pub struct FsSource {
    root: PathBuf,
    config: TripConfig,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>, config: TripConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn trips_dir(&self) -> PathBuf {
        self.root.join(&self.config.base)
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Maps a site-relative image path to a file, refusing anything that
    /// escapes the trips folder.
    pub fn locate(&self, path: &str) -> anyhow::Result<PathBuf> {
        let trips_dir = self.trips_dir().canonicalize()?;
        let file = self.full_path(path).canonicalize()?;

        if !file.starts_with(&trips_dir) {
            return Err(anyhow!("Image is outside of scope"));
        }
        if !file.metadata()?.is_file() {
            return Err(anyhow!("Passed a directory."));
        }

        Ok(file)
    }
}

impl TripSource for FsSource {
    async fn ready(&self) -> Result<(), SourceError> {
        let dir = self.trips_dir();
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(SourceError::Unavailable(dir)),
        }
    }

    async fn fetch_meta(&self, folder: &str) -> Result<TripMeta, SourceError> {
        let meta_path = self.config.meta_path(folder);
        let file = self.full_path(&meta_path);
        trace!("Reading {:?}", file);

        let raw = tokio::fs::read_to_string(&file)
            .await
            .map_err(|source| SourceError::Io { path: file, source })?;

        serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
            path: meta_path,
            source,
        })
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(self.full_path(path))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn list_images(&self, folder: &str) -> Option<Vec<String>> {
        let dir = self.trips_dir().join(folder);
        let images = list_folder(&dir);
        debug!("Listed {} images in {:?}", images.len(), dir);
        Some(images)
    }
}

fn list_folder(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_owned))
        .filter(|name| has_image_extension(name))
        .collect()
}
