pub mod api;
pub mod schema;
pub mod ui;

use actix_web::HttpRequest;

/// Path of a named route, percent-encoded. Falls back to `#` for unknown routes.
pub fn href<U, I>(req: &HttpRequest, name: &str, elements: U) -> String
where
    U: IntoIterator<Item = I>,
    I: AsRef<str>,
{
    req.url_for(name, elements)
        .map(|url| url.path().to_owned())
        .unwrap_or_else(|_| "#".to_owned())
}
