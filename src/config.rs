use crate::discovery::DiscoveryOptions;
use crate::library::Library;
use crate::source::{FsSource, HttpSource, Source};
use crate::trip::TripConfig;

use anyhow::anyhow;
use confique::Config;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};
use serde::Deserialize;
use std::path::PathBuf;

pub static CONFIG_PATH: &'static str = "/etc/trip-gallery/config.toml";

#[derive(Config, Deserialize, Clone)]
pub struct AppConfig {
    /// Folder holding one sub-folder per trip, relative to `root` or `remote`.
    #[config(default = "trips")]
    pub trips_folder: String,

    /// Trip folders in display order.
    #[config(default = [
        "Isha Foundation",
        "Manthralaya Trip - Second Time",
        "Mysore Dussehra",
        "Hampi Trip",
        "Mysore Trip with No Plan clan",
        "Ramdevara Betta",
        "Belur Trip",
        "Nandi Hills",
        "Anjanadri Trip",
        "Manthralaya Trip - First Time",
        "Kotilingeshwara",
        "Mandaragiri Hills",
        "Omkar Hills",
        "Shivagange Hills"
    ])]
    pub trips: Vec<String>,

    #[config(default = ".")]
    pub root: String,

    /// Base URL of a static host. When set, trips are fetched over HTTP instead of read from `root`.
    #[config()]
    pub remote: Option<String>,

    #[config(default = true)]
    pub probe_fallback: bool,

    #[config(default = 8)]
    pub probe_concurrency: usize,

    /// Thumbnail TTL in ms.
    #[config(default = 300000)]
    pub cache_age: i64,

    #[config(default = true)]
    pub watch: bool,

    #[config(default = "0.0.0.0:8080")]
    pub address: String,

    #[config(default = false)]
    pub ssl: bool,

    #[config()]
    pub cert: Option<String>,

    #[config()]
    pub key: Option<String>,
}

impl AppConfig {
    /// Loads the config file if it exists, falling back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        Ok(Self::builder().file(path).load()?)
    }

    pub fn trip_config(&self) -> TripConfig {
        TripConfig::new(&self.trips_folder, self.trips.clone())
    }

    pub fn discovery(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            probe_fallback: self.probe_fallback,
            probe_concurrency: self.probe_concurrency,
        }
    }

    pub fn library(&self) -> anyhow::Result<Library> {
        let config = self.trip_config();
        let source = match &self.remote {
            Some(url) => Source::Http(HttpSource::new(url, config.clone())?),
            None => Source::Fs(FsSource::new(&self.root, config.clone())),
        };

        Ok(Library {
            source,
            config,
            options: self.discovery(),
        })
    }

    pub fn check(&self) -> anyhow::Result<(String, String)> {
        let cert_missing = self.cert.is_none();
        let key_missing = self.key.is_none();

        if self.ssl && (cert_missing || key_missing) {
            let mut missing = Vec::new();
            if cert_missing {
                missing.push("certificate");
            }
            if key_missing {
                missing.push("key");
            }
            anyhow::bail!("SSL is enabled but missing {}!", missing.join(" and "));
        }

        let cert = self
            .cert
            .clone()
            .ok_or_else(|| anyhow!("Certificate is missing"))?;
        let key = self.key.clone().ok_or_else(|| anyhow!("Key is missing"))?;

        Ok((cert, key))
    }
}

// Takes in the certificate and key and generates an openssl instance.
// Most likely fail cause is missing certificates or incorrect permissions.
pub fn create_ssl_builder(
    cert_path: &str,
    key_path: &str,
) -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    match (
        PathBuf::from(&cert_path).exists(),
        PathBuf::from(&key_path).exists(),
    ) {
        (false, _) => return Err(anyhow!("Certificate does not exist.")),
        (_, false) => return Err(anyhow!("Key does not exist.")),
        (_, _) => {}
    }

    let mut builder = SslAcceptor::mozilla_intermediate(SslMethod::tls())?;

    builder.set_private_key_file(key_path, SslFiletype::PEM)?;
    builder.set_certificate_chain_file(cert_path)?;

    Ok(builder)
}
