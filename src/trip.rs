use serde::{Deserialize, Serialize};

/// Ordered roster of trip folders and the folder they live under.
#[derive(Clone, Debug)]
pub struct TripConfig {
    pub base: String,
    pub trips: Vec<String>,
}

impl TripConfig {
    pub fn new(base: impl Into<String>, trips: Vec<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_owned(),
            trips,
        }
    }

    /// `{base}/{folder}/{file}`
    pub fn resolve(&self, folder: &str, file: &str) -> String {
        format!("{}/{}/{}", self.base, folder, file)
    }

    pub fn meta_path(&self, folder: &str) -> String {
        self.resolve(folder, "meta.json")
    }
}

/// Contents of a trip's `meta.json`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TripMeta {
    pub trip_name: String,
    pub date: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl TripMeta {
    /// Explicit image list, if one was declared and it is not empty.
    pub fn declared_images(&self) -> Option<&[String]> {
        self.images
            .as_deref()
            .filter(|images| !images.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub folder: String,
    pub meta: TripMeta,
    pub images: Vec<String>,
}

impl Trip {
    pub fn cover_path(&self, config: &TripConfig) -> Option<String> {
        self.meta
            .cover
            .as_deref()
            .map(|cover| config.resolve(&self.folder, cover))
    }

    pub fn name(&self) -> &str {
        &self.meta.trip_name
    }
}
