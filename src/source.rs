pub mod fs;
pub mod http;

use crate::trip::TripMeta;
use std::path::PathBuf;
use thiserror::Error;

pub use self::fs::FsSource;
pub use self::http::HttpSource;

/// Extensions recognised as images, in probe order.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request for {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid metadata in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("cannot build a url for {path}: {reason}")]
    Url { path: String, reason: String },

    #[error("trips folder {0:?} is not available")]
    Unavailable(PathBuf),
}

/// Where trip metadata and images come from.
pub trait TripSource {
    /// Systemic check run once before the per-trip fan-out.
    async fn ready(&self) -> Result<(), SourceError>;

    async fn fetch_meta(&self, folder: &str) -> Result<TripMeta, SourceError>;

    /// Metadata-only existence check. Errors count as "absent".
    async fn exists(&self, path: &str) -> bool;

    /// Image file names of a trip folder, or `None` when the source cannot list.
    async fn list_images(&self, folder: &str) -> Option<Vec<String>>;
}

pub fn has_image_extension(file: &str) -> bool {
    file.rsplit_once('.')
        .map(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// The configured source. Trait methods are `async fn`, so dispatch is by enum.
pub enum Source {
    Fs(FsSource),
    Http(HttpSource),
}

impl TripSource for Source {
    async fn ready(&self) -> Result<(), SourceError> {
        match self {
            Source::Fs(source) => source.ready().await,
            Source::Http(source) => source.ready().await,
        }
    }

    async fn fetch_meta(&self, folder: &str) -> Result<TripMeta, SourceError> {
        match self {
            Source::Fs(source) => source.fetch_meta(folder).await,
            Source::Http(source) => source.fetch_meta(folder).await,
        }
    }

    async fn exists(&self, path: &str) -> bool {
        match self {
            Source::Fs(source) => source.exists(path).await,
            Source::Http(source) => source.exists(path).await,
        }
    }

    async fn list_images(&self, folder: &str) -> Option<Vec<String>> {
        match self {
            Source::Fs(source) => source.list_images(folder).await,
            Source::Http(source) => source.list_images(folder).await,
        }
    }
}
