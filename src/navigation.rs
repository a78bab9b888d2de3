//! Browsing state: which view is active, which trip is open and where the
//! lightbox stands. Nothing here renders; pages are built from these values.

pub mod gallery;
pub mod lightbox;
pub mod view;

pub use self::gallery::GallerySession;
pub use self::lightbox::LightboxAction;
pub use self::view::{View, ViewController};
