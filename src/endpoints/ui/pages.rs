use askama::Template;

pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

pub struct TripCard {
    pub href: String,
    pub cover_src: Option<String>,
    pub name: String,
    pub date: String,
    pub members: Vec<String>,
}

pub struct Thumb {
    pub href: String,
    pub src: String,
    pub alt: String,
}

#[derive(Template)]
#[template(path = "catalog.html.j2", ext = "html")]
pub struct CatalogPage {
    pub nav: Vec<NavLink>,
    pub cards: Vec<TripCard>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "about.html.j2", ext = "html")]
pub struct AboutPage {
    pub nav: Vec<NavLink>,
    pub trip_count: usize,
    pub image_count: usize,
    pub loaded_at: String,
    pub random_cover: Option<String>,
}

#[derive(Template)]
#[template(path = "gallery.html.j2", ext = "html")]
pub struct GalleryPage {
    pub nav: Vec<NavLink>,
    pub back_href: String,
    pub name: String,
    pub date: String,
    pub members: Vec<String>,
    pub thumbs: Vec<Thumb>,
}

#[derive(Template)]
#[template(path = "lightbox.html.j2", ext = "html")]
pub struct LightboxPage {
    pub name: String,
    pub src: String,
    pub alt: String,
    pub position: usize,
    pub total: usize,
    pub prev_href: String,
    pub next_href: String,
    pub close_href: String,
}
