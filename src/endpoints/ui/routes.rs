use crate::{
    catalog::CatalogState,
    endpoints::href,
    endpoints::schema::LightboxQuery,
    endpoints::ui::pages::{AboutPage, CatalogPage, GalleryPage, LightboxPage, NavLink, Thumb, TripCard},
    library::Library,
    navigation::{GallerySession, LightboxAction, View, ViewController},
    trip::{Trip, TripConfig},
};
use actix_web::{HttpRequest, HttpResponse, Responder, get, http::header, web};
use askama::Template;
use log::{debug, error};
use std::sync::Arc;

use tokio::sync::Mutex;

fn nav_links(req: &HttpRequest, views: &ViewController) -> Vec<NavLink> {
    vec![
        NavLink {
            href: href(req, "catalog", [""; 0]),
            label: "Trips",
            active: views.is_active(View::Catalog),
        },
        NavLink {
            href: href(req, "about", [""; 0]),
            label: "About",
            active: views.is_active(View::About),
        },
    ]
}

fn media_href(req: &HttpRequest, path: &str) -> String {
    href(req, "media", [path])
}

fn render(page: impl Template, what: &str) -> HttpResponse {
    match page.render() {
        Ok(page) => HttpResponse::Ok().content_type("text/html; charset=utf-8").body(page),
        Err(e) => {
            error!("Error templating {} page: {}", what, e);
            HttpResponse::InternalServerError().body(format!("Error templating {} page", what))
        }
    }
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn trip_card(req: &HttpRequest, trip: &Trip, config: &TripConfig) -> TripCard {
    TripCard {
        href: href(req, "gallery", [&trip.folder]),
        cover_src: trip
            .cover_path(config)
            .map(|path| format!("{}?thumb", media_href(req, &path))),
        name: trip.meta.trip_name.clone(),
        date: trip.meta.date.clone(),
        members: trip.meta.members.clone(),
    }
}

#[get("/", name = "catalog")]
pub async fn catalog(
    req: HttpRequest,
    library: web::Data<Arc<Library>>,
    state: web::Data<Arc<Mutex<CatalogState>>>,
) -> impl Responder {
    let mut views = ViewController::new();
    views.show(View::Catalog);

    let state = state.lock().await;
    let page = match state.catalog() {
        Ok(loaded) => CatalogPage {
            nav: nav_links(&req, &views),
            cards: loaded
                .trips
                .iter()
                .map(|trip| trip_card(&req, trip, &library.config))
                .collect(),
            error: None,
        },
        Err(_) => CatalogPage {
            nav: nav_links(&req, &views),
            cards: Vec::new(),
            error: Some("Error loading trips. Please try again.".to_owned()),
        },
    };

    render(page, "catalog")
}

#[get("/about", name = "about")]
pub async fn about(
    req: HttpRequest,
    library: web::Data<Arc<Library>>,
    state: web::Data<Arc<Mutex<CatalogState>>>,
) -> impl Responder {
    use rand::prelude::*;
    let mut rng = rand::rng();

    let mut views = ViewController::new();
    views.show(View::About);

    let state = state.lock().await;
    let (trip_count, image_count, loaded_at, random_cover) = match state.catalog() {
        Ok(loaded) => (
            loaded.trips.len(),
            loaded.image_count(),
            loaded.loaded_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            loaded
                .trips
                .choose(&mut rng)
                .and_then(|trip| trip.cover_path(&library.config))
                .map(|path| media_href(&req, &path)),
        ),
        Err(_) => (0, 0, "never".to_owned(), None),
    };

    render(
        AboutPage {
            nav: nav_links(&req, &views),
            trip_count,
            image_count,
            loaded_at,
            random_cover,
        },
        "about",
    )
}

/// Opens a session on `folder`, or `None` if no such trip is loaded.
async fn open_session(
    state: &Mutex<CatalogState>,
    folder: &str,
    views: &mut ViewController,
) -> Option<GallerySession> {
    let trip = state.lock().await.find(folder)?.clone();
    let mut session = GallerySession::new();
    session.open(trip, views);
    Some(session)
}

#[get("/gallery/{folder}", name = "gallery")]
pub async fn gallery(
    req: HttpRequest,
    state: web::Data<Arc<Mutex<CatalogState>>>,
    path: web::Path<String>,
) -> impl Responder {
    let folder = path.into_inner();
    let mut views = ViewController::new();
    let Some(session) = open_session(&state, &folder, &mut views).await else {
        return HttpResponse::NotFound().body("Trip not found");
    };
    let Some(trip) = session.trip() else {
        return HttpResponse::NotFound().body("Trip not found");
    };

    let thumbs = session
        .images()
        .iter()
        .enumerate()
        .map(|(index, image)| Thumb {
            href: href(&req, "lightbox", [folder.clone(), index.to_string()]),
            src: format!("{}?thumb", media_href(&req, image)),
            alt: format!("{} - Image {}", trip.name(), index + 1),
        })
        .collect();

    let nav = nav_links(&req, &views);
    let mut back = views;
    back.back();
    let back_href = nav_links(&req, &back)
        .into_iter()
        .find(|link| link.active)
        .map(|link| link.href)
        .unwrap_or_else(|| "/".to_owned());

    render(
        GalleryPage {
            nav,
            back_href,
            name: trip.meta.trip_name.clone(),
            date: trip.meta.date.clone(),
            members: trip.meta.members.clone(),
            thumbs,
        },
        "gallery",
    )
}

#[get("/gallery/{folder}/{index}", name = "lightbox")]
pub async fn lightbox(
    req: HttpRequest,
    state: web::Data<Arc<Mutex<CatalogState>>>,
    path: web::Path<(String, usize)>,
    query: web::Query<LightboxQuery>,
) -> impl Responder {
    let (folder, index) = path.into_inner();
    let mut views = ViewController::new();
    let Some(mut session) = open_session(&state, &folder, &mut views).await else {
        return HttpResponse::NotFound().body("Trip not found");
    };
    session.open_image(index);

    if let Some(key) = query.key.as_deref() {
        let Ok(action) = key.parse::<LightboxAction>() else {
            debug!("Ignoring lightbox key {}", key);
            return see_other(href(&req, "lightbox", [folder.clone(), index.to_string()]));
        };
        session.apply(action);

        let location = if session.lightbox().is_open() {
            href(&req, "lightbox", [folder.clone(), session.lightbox().index().to_string()])
        } else {
            href(&req, "gallery", [&folder])
        };
        return see_other(location);
    }

    let (Some(trip), Some(image)) = (session.trip(), session.current_image()) else {
        return HttpResponse::NotFound().body("Image not found");
    };

    let self_href = href(&req, "lightbox", [folder.clone(), index.to_string()]);
    render(
        LightboxPage {
            name: trip.meta.trip_name.clone(),
            src: media_href(&req, image),
            alt: format!("{} - Image {}", trip.name(), index + 1),
            position: index + 1,
            total: session.images().len(),
            prev_href: format!("{}?key=ArrowLeft", self_href),
            next_href: format!("{}?key=ArrowRight", self_href),
            close_href: href(&req, "gallery", [&folder]),
        },
        "lightbox",
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::load_catalog;
    use crate::discovery::DiscoveryOptions;
    use crate::source::{FsSource, Source};
    use actix_web::{App, http::StatusCode, test};
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        DynamicImage::ImageRgb8(RgbImage::new(32, 24))
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    /// Three loadable trips plus one configured trip without a folder.
    pub(crate) async fn fixture() -> (TempDir, Arc<Library>, Arc<Mutex<CatalogState>>) {
        let dir = tempfile::tempdir().unwrap();
        let trips = dir.path().join("trips");

        let hampi = trips.join("Hampi Trip");
        fs::create_dir_all(&hampi).unwrap();
        fs::write(
            hampi.join("meta.json"),
            r#"{"trip_name":"Hampi","date":"Jan 2024","members":["Ravi","Meera"],"cover":"a.png","images":["b.png","a.png","c.png"]}"#,
        )
        .unwrap();
        write_png(&hampi.join("a.png"));
        write_png(&hampi.join("b.png"));

        let empty = trips.join("empty");
        fs::create_dir_all(&empty).unwrap();
        fs::write(
            empty.join("meta.json"),
            r#"{"trip_name":"Empty Trip","date":"Feb 2024","members":[],"images":[]}"#,
        )
        .unwrap();

        let discovered = trips.join("discovered");
        fs::create_dir_all(&discovered).unwrap();
        fs::write(
            discovered.join("meta.json"),
            r#"{"trip_name":"Found","date":"Mar 2024","members":["Ravi"],"cover":"cover.png"}"#,
        )
        .unwrap();
        write_png(&discovered.join("img1.png"));
        write_png(&discovered.join("cover.png"));

        let config = TripConfig::new(
            "trips",
            ["Hampi Trip", "missing", "empty", "discovered"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        );
        let library = Library {
            source: Source::Fs(FsSource::new(dir.path(), config.clone())),
            config,
            options: DiscoveryOptions::default(),
        };
        let loaded = load_catalog(&library.source, &library.config, &library.options).await;
        let state = Arc::new(Mutex::new(CatalogState::from(loaded)));

        (dir, Arc::new(library), state)
    }

    macro_rules! ui_app {
        ($library:expr, $state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($library))
                    .app_data(web::Data::new($state))
                    .service(catalog)
                    .service(about)
                    .service(gallery)
                    .service(lightbox)
                    .service(crate::endpoints::api::get_media),
            )
            .await
        };
    }

    async fn body_of(resp: actix_web::dev::ServiceResponse) -> String {
        String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
    }

    fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
    }

    #[actix_web::test]
    async fn test_catalog_lists_cards_in_order() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;

        let hampi = body.find("Hampi").unwrap();
        let empty = body.find("Empty Trip").unwrap();
        let found = body.find("Found").unwrap();
        assert!(hampi < empty && empty < found);
        assert!(body.contains("/gallery/Hampi%20Trip"));
        assert!(body.contains("/media/trips/Hampi%20Trip/a.png?thumb"));
    }

    #[actix_web::test]
    async fn test_catalog_failure_is_inline() {
        let (dir, library, _state) = fixture().await;
        fs::remove_dir_all(dir.path().join("trips")).unwrap();
        let failed = load_catalog(&library.source, &library.config, &library.options).await;
        let app = ui_app!(library, Arc::new(Mutex::new(CatalogState::from(failed))));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_of(resp).await.contains("Error loading trips. Please try again."));
    }

    #[actix_web::test]
    async fn test_gallery_renders_thumbnails_in_order() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/gallery/Hampi%20Trip").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;

        let b = body.find("Hampi%20Trip/b.png?thumb").unwrap();
        let a = body.find("Hampi%20Trip/a.png?thumb").unwrap();
        assert!(b < a);
        assert!(body.contains("Meera"));
        assert!(body.contains("/gallery/Hampi%20Trip/2"));
        assert!(body.contains(r#"id="back-btn" href="/""#));
    }

    #[actix_web::test]
    async fn test_empty_gallery_placeholder() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/gallery/empty").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_of(resp).await.contains("No images found for this trip."));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/gallery/empty/0").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/gallery/empty/0?key=ArrowRight").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/gallery/empty/0");
    }

    #[actix_web::test]
    async fn test_lightbox_keys_wrap_and_close() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/gallery/Hampi%20Trip/0?key=ArrowLeft").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/gallery/Hampi%20Trip/2");

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/gallery/Hampi%20Trip/2?key=ArrowRight").to_request(),
        )
        .await;
        assert_eq!(location(&resp), "/gallery/Hampi%20Trip/0");

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/gallery/Hampi%20Trip/1?key=Escape").to_request(),
        )
        .await;
        assert_eq!(location(&resp), "/gallery/Hampi%20Trip");
    }

    #[actix_web::test]
    async fn test_lightbox_keys_from_out_of_range_index() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        for uri in [
            "/gallery/Hampi%20Trip/7?key=ArrowRight",
            "/gallery/Hampi%20Trip/7?key=ArrowLeft",
            "/gallery/Hampi%20Trip/9223372036854775807?key=ArrowRight",
            "/gallery/Hampi%20Trip/18446744073709551615?key=ArrowRight",
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", uri);
            assert_eq!(location(&resp), "/gallery/Hampi%20Trip/0", "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_lightbox_page() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/gallery/Hampi%20Trip/1").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("/media/trips/Hampi%20Trip/a.png"));
        assert!(body.contains("Hampi - Image 2"));
        assert!(body.contains("2 / 3"));

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/gallery/Hampi%20Trip/7").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_about_marks_nav_active() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/about").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("3 trips, 5 images."));
        assert!(body.contains(r#"href="/about" class="nav-btn active""#));
    }

    #[actix_web::test]
    async fn test_unknown_trip_is_404() {
        let (_dir, library, state) = fixture().await;
        let app = ui_app!(library, state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/gallery/missing").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
