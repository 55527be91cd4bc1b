//! Clipped drawing primitives
//!
//! This is the public drawing surface of the crate. Every entry point here
//! accepts arbitrary caller coordinates and clips them against the target
//! image before calling the image's unchecked fast paths.
//!
//! Two error policies coexist:
//!
//! - Out-of-range geometry is routine. Reads return `None`, writes and shape
//!   drawers clip or do nothing.
//! - Requests that make no sense (a crop narrower than one pixel, a rotation
//!   by an unsupported angle) return [`PrimitiveError`] before anything is
//!   allocated or mutated.

use crate::graphics::algo::{algo_ellipse_clipped, algo_ellipsefill_clipped, algo_line_clipped};
use crate::graphics::color::Color;
use crate::graphics::geometry::{Clip, Rect};
use crate::graphics::image::{Image, ImageBuffer};

/// Errors raised by region operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitiveError {
    #[error("crop width must be at least 1 (got {0})")]
    InvalidCropWidth(i32),

    #[error("crop height must be at least 1 (got {0})")]
    InvalidCropHeight(i32),

    #[error("invalid rotation angle {0} (expected 90, -90 or 180)")]
    InvalidAngle(i32),
}

// ==============================================================================
// Pixel access
// ==============================================================================

/// Read one pixel. Returns `None` ("no pixel") outside the image.
pub fn get_pixel(image: &Image, x: i32, y: i32) -> Option<Color> {
    if image.contains(x, y) {
        Some(image.get_pixel_unchecked(x, y))
    } else {
        None
    }
}

/// Write one pixel. Coordinates outside the image are ignored.
pub fn put_pixel(image: &mut Image, x: i32, y: i32, color: Color) {
    if image.contains(x, y) {
        image.put_pixel_unchecked(x, y, color);
    }
}

pub fn clear_image(image: &mut Image, color: Color) {
    image.clear(color);
}

// ==============================================================================
// Region operations
// ==============================================================================

/// Copy all of `src` into `dst` at the origin.
pub fn copy_image(dst: &mut Image, src: &Image) {
    copy_image_at(dst, src, 0, 0);
}

/// Copy all of `src` into `dst` with its top-left corner at `(x, y)`.
pub fn copy_image_at(dst: &mut Image, src: &Image, x: i32, y: i32) {
    dst.copy(src, Clip::new(x, y, 0, 0, src.width(), src.height()));
}

/// Cut the `w`×`h` region at `(x, y)` out of `image` into a new image.
///
/// Parts of the region outside `image` are left as `bg`. `buffer`, when
/// given, provides the allocation for the result.
pub fn crop_image(
    image: &Image,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    bg: Color,
    buffer: Option<ImageBuffer>,
) -> Result<Image, PrimitiveError> {
    if w < 1 {
        log::warn!("crop_image rejected: width {}", w);
        return Err(PrimitiveError::InvalidCropWidth(w));
    }
    if h < 1 {
        log::warn!("crop_image rejected: height {}", h);
        return Err(PrimitiveError::InvalidCropHeight(h));
    }

    log::debug!(
        "crop_image: {} {}x{} at ({}, {}) from {}x{}",
        image.pixel_format(),
        w,
        h,
        x,
        y,
        image.width(),
        image.height()
    );

    let mut trim = Image::create(image.pixel_format(), w, h, buffer);
    trim.set_mask_color(image.mask_color());

    clear_image(&mut trim, bg);
    trim.copy(image, Clip::new(0, 0, x, y, w, h));

    Ok(trim)
}

/// Rotate `src` into `dst` by 90, -90 or 180 degrees.
///
/// `dst` must already have the rotated dimensions (same as `src` for 180,
/// swapped for ±90). Any other angle fails without touching `dst`.
pub fn rotate_image(src: &Image, dst: &mut Image, angle: i32) -> Result<(), PrimitiveError> {
    let w = src.width();
    let h = src.height();

    match angle {
        180 => {
            debug_assert!(dst.width() == w && dst.height() == h);
            for y in 0..h {
                for x in 0..w {
                    dst.put_pixel_unchecked(w - x - 1, h - y - 1, src.get_pixel_unchecked(x, y));
                }
            }
        }
        90 => {
            debug_assert!(dst.width() == h && dst.height() == w);
            for y in 0..h {
                for x in 0..w {
                    dst.put_pixel_unchecked(h - y - 1, x, src.get_pixel_unchecked(x, y));
                }
            }
        }
        -90 => {
            debug_assert!(dst.width() == h && dst.height() == w);
            for y in 0..h {
                for x in 0..w {
                    dst.put_pixel_unchecked(y, w - x - 1, src.get_pixel_unchecked(x, y));
                }
            }
        }
        _ => {
            log::warn!("rotate_image rejected: angle {}", angle);
            return Err(PrimitiveError::InvalidAngle(angle));
        }
    }

    log::debug!("rotate_image: {} {}x{} by {}", src.pixel_format(), w, h, angle);
    Ok(())
}

// ==============================================================================
// Clipped shapes
// ==============================================================================

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Order both corner pairs and clamp them to the image.
///
/// Returns `None` when the rectangle misses the image entirely.
fn clamp_rect(image: &Image, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(i32, i32, i32, i32)> {
    let (x1, x2) = ordered(x1, x2);
    let (y1, y2) = ordered(y1, y2);

    if x2 < 0 || x1 >= image.width() || y2 < 0 || y1 >= image.height() {
        return None;
    }

    Some((
        x1.max(0),
        y1.max(0),
        x2.min(image.width() - 1),
        y2.min(image.height() - 1),
    ))
}

pub fn draw_hline(image: &mut Image, x1: i32, y: i32, x2: i32, color: Color) {
    let (x1, x2) = ordered(x1, x2);

    if x2 < 0 || x1 >= image.width() || y < 0 || y >= image.height() {
        return;
    }

    let x1 = x1.max(0);
    let x2 = x2.min(image.width() - 1);
    image.draw_hline(x1, y, x2, color);
}

pub fn draw_vline(image: &mut Image, x: i32, y1: i32, y2: i32, color: Color) {
    let (y1, y2) = ordered(y1, y2);

    if y2 < 0 || y1 >= image.height() || x < 0 || x >= image.width() {
        return;
    }

    let y1 = y1.max(0);
    let y2 = y2.min(image.height() - 1);
    for y in y1..=y2 {
        image.put_pixel_unchecked(x, y, color);
    }
}

/// One-pixel rectangle outline. Corners are painted once.
pub fn draw_rect(image: &mut Image, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
    let (x1, x2) = ordered(x1, x2);
    let (y1, y2) = ordered(y1, y2);

    if x2 < 0 || x1 >= image.width() || y2 < 0 || y1 >= image.height() {
        return;
    }

    draw_hline(image, x1, y1, x2, color);
    draw_hline(image, x1, y2, x2, color);
    if y2.abs_diff(y1) > 1 {
        draw_vline(image, x1, y1 + 1, y2 - 1, color);
        draw_vline(image, x2, y1 + 1, y2 - 1, color);
    }
}

pub fn fill_rect(image: &mut Image, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
    if let Some((x1, y1, x2, y2)) = clamp_rect(image, x1, y1, x2, y2) {
        image.fill_rect(x1, y1, x2, y2, color);
    }
}

/// [`fill_rect`] taking a rectangle instead of corner coordinates.
pub fn fill_rect_bounds(image: &mut Image, rc: Rect, color: Color) {
    let clip = rc.intersect(&image.bounds());
    if !clip.is_empty() {
        image.fill_rect(clip.corner.x, clip.corner.y, clip.x2() - 1, clip.y2() - 1, color);
    }
}

/// Blend `color` over the rectangle with `opacity` in `0..=255`.
pub fn blend_rect(image: &mut Image, x1: i32, y1: i32, x2: i32, y2: i32, color: Color, opacity: i32) {
    if let Some((x1, y1, x2, y2)) = clamp_rect(image, x1, y1, x2, y2) {
        image.blend_rect(x1, y1, x2, y2, color, opacity);
    }
}

// ==============================================================================
// Curves
// ==============================================================================

// Work is bounded by the image size, not by how far off it the shape reaches.

pub fn draw_line(image: &mut Image, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
    let bounds = image.bounds();
    algo_line_clipped(x1, y1, x2, y2, &bounds, |x, y| put_pixel(image, x, y, color));
}

pub fn draw_ellipse(image: &mut Image, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
    let bounds = image.bounds();
    algo_ellipse_clipped(x1, y1, x2, y2, &bounds, |x, y| put_pixel(image, x, y, color));
}

pub fn fill_ellipse(image: &mut Image, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
    let bounds = image.bounds();
    algo_ellipsefill_clipped(x1, y1, x2, y2, &bounds, |xa, y, xb| {
        draw_hline(image, xa, y, xb, color)
    });
}
