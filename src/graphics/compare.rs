//! Pixel-difference comparator
//!
//! The inner loop is generic over [`PixelTraits`], so each format gets its
//! own monomorphized walk over raw pixels.

use crate::graphics::image::{Image, ImageImpl};
use crate::graphics::pixel_traits::PixelTraits;

fn count_diff_between_images_templ<T: PixelTraits>(a: &ImageImpl<T>, b: &ImageImpl<T>) -> usize {
    let pixels_a = a.pixels();
    let pixels_b = b.pixels();
    debug_assert_eq!(pixels_a.len(), pixels_b.len());

    pixels_a.zip(pixels_b).filter(|(pa, pb)| pa != pb).count()
}

/// Number of pixels that differ between `a` and `b`.
///
/// Returns `None` when the images cannot be compared (different pixel
/// format, width or height). `Some(0)` means pixel-identical.
pub fn count_diff_between_images(a: &Image, b: &Image) -> Option<usize> {
    if a.pixel_format() != b.pixel_format() || a.width() != b.width() || a.height() != b.height() {
        return None;
    }

    let diff = match (a, b) {
        (Image::Rgb(a), Image::Rgb(b)) => count_diff_between_images_templ(a, b),
        (Image::Grayscale(a), Image::Grayscale(b)) => count_diff_between_images_templ(a, b),
        (Image::Indexed(a), Image::Indexed(b)) => count_diff_between_images_templ(a, b),
        (Image::Bitmap(a), Image::Bitmap(b)) => count_diff_between_images_templ(a, b),
        _ => unreachable!("pixel formats already checked equal"),
    };
    Some(diff)
}
