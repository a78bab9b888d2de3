use crate::catalog::{Catalog, CatalogError, CatalogState, load_catalog, reload};
use crate::discovery::DiscoveryOptions;
use crate::source::Source;
use crate::trip::TripConfig;

use std::path::PathBuf;
use tokio::sync::Mutex;

/// Everything needed to (re)build the catalog.
pub struct Library {
    pub source: Source,
    pub config: TripConfig,
    pub options: DiscoveryOptions,
}

impl Library {
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        load_catalog(&self.source, &self.config, &self.options).await
    }

    pub async fn reload(&self, state: &Mutex<CatalogState>) {
        reload(&self.source, &self.config, &self.options, state).await
    }

    /// Local folder worth watching, if the trips live on disk.
    /// Falls back to the root while the trips folder does not exist yet.
    pub fn watch_dir(&self) -> Option<PathBuf> {
        match &self.source {
            Source::Fs(source) => {
                let trips = source.trips_dir();
                if trips.is_dir() {
                    Some(trips)
                } else {
                    Some(source.root().to_path_buf())
                }
            }
            Source::Http(_) => None,
        }
    }
}
