use crate::trip::Trip;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Return body for GET /api/trips
#[derive(Deserialize, Serialize)]
pub struct CatalogJson {
    pub loaded_at: DateTime<Utc>,
    pub trips: Vec<TripJson>,
}

#[derive(Deserialize, Serialize)]
pub struct TripJson {
    pub folder: String,
    pub trip_name: String,
    pub date: String,
    pub members: Vec<String>,
    pub cover: Option<String>,
    pub images: Vec<String>,
}

impl From<&Trip> for TripJson {
    fn from(trip: &Trip) -> Self {
        Self {
            folder: trip.folder.to_owned(),
            trip_name: trip.meta.trip_name.to_owned(),
            date: trip.meta.date.to_owned(),
            members: trip.meta.members.clone(),
            cover: trip.meta.cover.clone(),
            images: trip.images.clone(),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct ErrorJson {
    pub error: String,
}

#[derive(Deserialize)]
pub struct MediaQuery {
    pub thumb: Option<String>,
}

#[derive(Deserialize)]
pub struct LightboxQuery {
    pub key: Option<String>,
}
