use actix_web::mime;
use sha2::{Digest, Sha256};
use std::path::Path;

/// An image file read from disk, ready to be served.
pub struct MediaFile {
    pub data: Vec<u8>,
    pub content_type: String,
    pub etag: String,
}

impl MediaFile {
    pub async fn read(path: &Path) -> Result<Self, anyhow::Error> {
        let data = tokio::fs::read(path).await?;
        Ok(Self {
            content_type: content_type(imghdr::from_bytes(&data)),
            etag: etag(&data),
            data,
        })
    }
}

pub fn content_type(kind: Option<imghdr::Type>) -> String {
    match kind {
        Some(imghdr::Type::Gif) => mime::IMAGE_GIF.to_string(),
        Some(imghdr::Type::Tiff) => "image/tiff".to_string(),
        Some(imghdr::Type::Jpeg) => mime::IMAGE_JPEG.to_string(),
        Some(imghdr::Type::Bmp) => mime::IMAGE_BMP.to_string(),
        Some(imghdr::Type::Png) => mime::IMAGE_PNG.to_string(),
        Some(imghdr::Type::Webp) => "image/webp".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

/// Quoted strong validator for the `ETag` header.
pub fn etag(data: &[u8]) -> String {
    format!("\"{:x}\"", Sha256::digest(data))
}
