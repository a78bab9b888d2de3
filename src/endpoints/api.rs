use std::sync::Arc;

use crate::catalog::CatalogState;
use crate::endpoints::schema::{CatalogJson, ErrorJson, MediaQuery, TripJson};
use crate::library::Library;
use crate::media::MediaFile;
use crate::source::Source;
use crate::thumbnail::ThumbnailCache;
use actix_web::{
    HttpResponse, Responder, get,
    http::header::{self, ContentType},
    post, web,
};
use log::{error, info};
use tokio::sync::Mutex;

#[get("/api/trips")]
pub async fn list_trips(state: web::Data<Arc<Mutex<CatalogState>>>) -> impl Responder {
    let state = state.lock().await;
    match state.catalog() {
        Ok(loaded) => HttpResponse::Ok().content_type(ContentType::json()).json(CatalogJson {
            loaded_at: loaded.loaded_at,
            trips: loaded.trips.iter().map(TripJson::from).collect(),
        }),
        Err(e) => HttpResponse::ServiceUnavailable().json(ErrorJson {
            error: e.to_string(),
        }),
    }
}

#[get("/api/trips/{folder}")]
pub async fn get_trip(
    state: web::Data<Arc<Mutex<CatalogState>>>,
    path: web::Path<String>,
) -> impl Responder {
    let folder = path.into_inner();
    match state.lock().await.find(&folder) {
        Some(trip) => HttpResponse::Ok().json(TripJson::from(trip)),
        None => HttpResponse::NotFound().json(ErrorJson {
            error: format!("No trip named {}", folder),
        }),
    }
}

/// Re-derives the whole catalog from the source.
#[post("/api/reload")]
pub async fn reload_catalog(
    library: web::Data<Arc<Library>>,
    state: web::Data<Arc<Mutex<CatalogState>>>,
) -> impl Responder {
    info!("Catalog reload requested");
    library.reload(&state).await;

    match state.lock().await.catalog() {
        Ok(loaded) => HttpResponse::Ok().json(CatalogJson {
            loaded_at: loaded.loaded_at,
            trips: loaded.trips.iter().map(TripJson::from).collect(),
        }),
        Err(e) => HttpResponse::ServiceUnavailable().json(ErrorJson {
            error: e.to_string(),
        }),
    }
}

#[get("/media/{path:.*}", name = "media")]
pub async fn get_media(
    library: web::Data<Arc<Library>>,
    thumbnails: web::Data<Arc<Mutex<ThumbnailCache>>>,
    path: web::Path<String>,
    query: web::Query<MediaQuery>,
) -> impl Responder {
    let image_path = path.into_inner();
    let thumbnail = query.thumb.is_some();

    let source = match &library.source {
        Source::Fs(source) => source,
        Source::Http(source) => {
            // Remote images are served by their own host.
            return match source.url(&image_path) {
                Ok(url) => HttpResponse::Found()
                    .insert_header((header::LOCATION, url.to_string()))
                    .finish(),
                Err(e) => {
                    error!("Error with requested file {:?}", e);
                    HttpResponse::NotFound().finish()
                }
            };
        }
    };

    let file = match source.locate(&image_path) {
        Ok(file) => file,
        Err(e) => {
            error!("Error with requested file {:?}: {}", image_path, e);
            return HttpResponse::NotFound().finish();
        }
    };

    if thumbnail {
        match thumbnails.lock().await.get(&file).await {
            Ok(thumb) => {
                return HttpResponse::Ok()
                    .content_type("image/webp")
                    .insert_header((header::ETAG, thumb.etag))
                    .body(thumb.data);
            }
            // Fall through to the original file when it cannot be shrunk.
            Err(e) => error!("Error rendering thumbnail for {:?}: {}", file, e),
        }
    }

    match MediaFile::read(&file).await {
        Ok(media) => HttpResponse::Ok()
            .content_type(media.content_type)
            .insert_header((header::ETAG, media.etag))
            .body(media.data),
        Err(e) => {
            error!("Error reading {:?}: {}", file, e);
            HttpResponse::NotFound().finish()
        }
    }
}
