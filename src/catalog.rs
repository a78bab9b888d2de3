use crate::discovery::DiscoveryOptions;
use crate::loader::load_trip;
use crate::source::{SourceError, TripSource};
use crate::trip::{Trip, TripConfig};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{error, info};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Error loading trips: {0}")]
    Source(#[from] SourceError),
}

/// Every trip that loaded, in configured order.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub trips: Vec<Trip>,
    pub loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn find(&self, folder: &str) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.folder == folder)
    }

    pub fn image_count(&self) -> usize {
        self.trips.iter().map(|trip| trip.images.len()).sum()
    }
}

pub async fn load_catalog<S: TripSource>(
    source: &S,
    config: &TripConfig,
    options: &DiscoveryOptions,
) -> Result<Catalog, CatalogError> {
    source.ready().await?;

    let loaded = join_all(
        config
            .trips
            .iter()
            .map(|folder| load_trip(source, config, folder, options)),
    )
    .await;

    let trips: Vec<Trip> = loaded.into_iter().flatten().collect();
    info!(
        "Loaded {} of {} configured trips",
        trips.len(),
        config.trips.len()
    );

    Ok(Catalog {
        trips,
        loaded_at: Utc::now(),
    })
}

/// The catalog currently being served.
pub struct CatalogState {
    current: Result<Catalog, CatalogError>,
}

impl CatalogState {
    pub fn catalog(&self) -> Result<&Catalog, &CatalogError> {
        self.current.as_ref()
    }

    pub fn find(&self, folder: &str) -> Option<&Trip> {
        self.current.as_ref().ok()?.find(folder)
    }

    pub fn replace(&mut self, loaded: Result<Catalog, CatalogError>) {
        self.current = loaded;
    }
}

impl From<Result<Catalog, CatalogError>> for CatalogState {
    fn from(current: Result<Catalog, CatalogError>) -> Self {
        Self { current }
    }
}

/// Re-derives the whole catalog and swaps it in. The lock is only held for the swap.
pub async fn reload<S: TripSource>(
    source: &S,
    config: &TripConfig,
    options: &DiscoveryOptions,
    state: &Mutex<CatalogState>,
) {
    let loaded = load_catalog(source, config, options).await;
    if let Err(e) = &loaded {
        error!("{}", e);
    }
    state.lock().await.replace(loaded);
}
