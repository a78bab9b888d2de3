mod catalog;
mod config;
mod discovery;
mod endpoints;
mod library;
mod loader;
mod media;
mod navigation;
mod source;
mod thumbnail;
mod trip;
mod watcher;

use actix_web::{App, HttpServer, middleware, web};
use log::{error, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::catalog::CatalogState;
use crate::thumbnail::{ThumbnailCache, cache_cleanup};
use crate::watcher::trips_watcher;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_config = config::AppConfig::load(config::CONFIG_PATH)?;
    let bind_address = app_config.address.clone();

    let ssl_enabled = app_config.ssl;
    let certificate_bundle = app_config.check();

    let library = Arc::new(app_config.library()?);
    let catalog = library.load().await;
    if let Err(e) = &catalog {
        error!("{}", e);
    }
    let shared_catalog = Arc::new(Mutex::new(CatalogState::from(catalog)));

    let thumbnails = Arc::new(Mutex::new(ThumbnailCache::from(app_config.cache_age)));

    {
        let thumbnails = Arc::clone(&thumbnails);
        tokio::spawn(async move {
            cache_cleanup(thumbnails).await;
        });
    }

    if app_config.watch {
        let library = Arc::clone(&library);
        let catalog = Arc::clone(&shared_catalog);
        actix_web::rt::spawn(async move {
            trips_watcher(library, catalog).await;
        });
    }

    info!("Starting server at {}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(library.clone()))
            .app_data(web::Data::new(shared_catalog.clone()))
            .app_data(web::Data::new(thumbnails.clone()))
            .service(endpoints::api::list_trips)
            .service(endpoints::api::get_trip)
            .service(endpoints::api::reload_catalog)
            .service(endpoints::api::get_media)
            .service(endpoints::ui::routes::catalog)
            .service(endpoints::ui::routes::about)
            .service(endpoints::ui::routes::gallery)
            .service(endpoints::ui::routes::lightbox)
    });

    if ssl_enabled {
        match certificate_bundle {
            Ok((cert, key)) => {
                info!("Starting server with SSL enabled.");
                let builder = config::create_ssl_builder(&cert, &key).map_err(|e| {
                    error!("Error creating TLS instance: {}", e);
                    anyhow::anyhow!("Cannot access certificates!")
                })?;
                server.bind_openssl(bind_address, builder)?.run().await?;
            }
            Err(e) => {
                error!("Invalid certificate bundle: {}", e);
                return Err(e);
            }
        }
    } else {
        info!("Starting server without SSL.");
        server.bind(bind_address)?.run().await?;
    }

    Ok(())
}
