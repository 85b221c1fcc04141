use ora_types::Size;

/// Longest side of the thumbnail, in pixels.
pub const THUMBNAIL_MAX_SIDE: u32 = 255;
pub const THUMBNAIL_DIR: &str = "Thumbnails";
pub const THUMBNAIL_FILE: &str = "thumbnail.png";

/// Scales `image` down so its longest side is `THUMBNAIL_MAX_SIDE`, keeping
/// the aspect ratio. The short side is truncated, never rounded up, and
/// never drops below one pixel. Images already within the cap keep their
/// size.
pub fn thumbnail_size(image: Size) -> Size {
    if image.longest_side() <= THUMBNAIL_MAX_SIDE {
        return image;
    }
    let Size { width, height } = image;

    let scale_short = |short: u32, long: u32| -> u32 {
        let scaled = u64::from(THUMBNAIL_MAX_SIDE) * u64::from(short) / u64::from(long);
        u32::try_from(scaled).unwrap_or(THUMBNAIL_MAX_SIDE).max(1)
    };

    match width.cmp(&height) {
        std::cmp::Ordering::Greater => Size::new(THUMBNAIL_MAX_SIDE, scale_short(height, width)),
        std::cmp::Ordering::Less => Size::new(scale_short(width, height), THUMBNAIL_MAX_SIDE),
        std::cmp::Ordering::Equal => Size::new(THUMBNAIL_MAX_SIDE, THUMBNAIL_MAX_SIDE),
    }
}
