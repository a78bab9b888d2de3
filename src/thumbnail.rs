pub mod cache;
pub mod render;

pub use self::cache::{ThumbnailCache, cache_cleanup};
