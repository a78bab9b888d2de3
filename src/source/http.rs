use super::{SourceError, TripSource};
use crate::trip::{TripConfig, TripMeta};

use log::trace;
use reqwest::{Client, Url};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Trips published on a static web host.
pub struct HttpSource {
    client: Client,
    base_url: Url,
    config: TripConfig,
}

impl HttpSource {
    pub fn new(base_url: &str, config: TripConfig) -> Result<Self, SourceError> {
        let mut base = base_url.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }

        let base_url = Url::parse(&base).map_err(|e| SourceError::Url {
            path: base.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| SourceError::Http {
                url: base.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Absolute URL of a site-relative path under the trips folder.
    ///
    /// Each segment is percent-encoded on its own, so folder names may hold
    /// `#` or `?`. Absolute URLs, empty segments and `.`/`..` are refused.
    pub fn url(&self, path: &str) -> Result<Url, SourceError> {
        let invalid = |reason: &str| SourceError::Url {
            path: path.to_owned(),
            reason: reason.to_owned(),
        };

        let base = &self.config.base;
        if !base.is_empty() && !path.starts_with(&format!("{}/", base)) {
            return Err(invalid("outside of the trips folder"));
        }

        let segments: Vec<&str> = path.split('/').collect();
        if segments
            .iter()
            .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
        {
            return Err(invalid("not a plain relative path"));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| invalid("base url cannot hold a path"))?
            .pop_if_empty()
            .extend(segments.iter());

        Ok(url)
    }
}

impl TripSource for HttpSource {
    async fn ready(&self) -> Result<(), SourceError> {
        Ok(())
    }

    async fn fetch_meta(&self, folder: &str) -> Result<TripMeta, SourceError> {
        let meta_path = self.config.meta_path(folder);
        let url = self.url(&meta_path)?;
        trace!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .json::<TripMeta>()
            .await
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })
    }

    async fn exists(&self, path: &str) -> bool {
        let Ok(url) = self.url(path) else {
            return false;
        };

        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_images(&self, _folder: &str) -> Option<Vec<String>> {
        None
    }
}
