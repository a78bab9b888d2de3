use anyhow::anyhow;
use exif::{In, Reader, Tag};
use image::DynamicImage;

const WEBP_QUALITY: f32 = 82.0;
/// Longest edge of a gallery thumbnail, in pixels.
pub const THUMBNAIL_EDGE: u32 = 480;

fn apply_exif_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.fliph().rotate90(),
        6 => img.rotate90(),
        7 => img.fliph().rotate270(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Extract EXIF orientation if present
fn exif_orientation(data: &[u8]) -> Result<u32, anyhow::Error> {
    let exif = Reader::new()
        .read_from_container(&mut std::io::Cursor::new(data))
        .map_err(|e| anyhow!("EXIF parse error: {}", e))?;

    let field = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .ok_or_else(|| anyhow!("No Orientation tag found"))?;

    field
        .value
        .get_uint(0)
        .ok_or_else(|| anyhow!("Invalid orientation value"))
}

/// Decodes, orients, shrinks and re-encodes an image as WebP.
pub fn render_thumbnail(data: &[u8]) -> Result<Vec<u8>, anyhow::Error> {
    let img = image::load_from_memory(data)?;

    let orientation = exif_orientation(data).unwrap_or(1);
    let oriented = apply_exif_orientation(img, orientation);
    let small = DynamicImage::ImageRgba8(oriented.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgba8());

    let encoder = webp::Encoder::from_image(&small)
        .map_err(|err| anyhow!("Error parsing file: {}", err))?;

    encoder
        .encode_simple(false, WEBP_QUALITY)
        .map_err(|err| anyhow!("Error encoding data: {:#?}", err))
        .map(|mem| mem.to_vec())
}
