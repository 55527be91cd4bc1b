//!
//! Raster core: surfaces, clipped primitives and the image comparator.

pub mod algo;
pub mod color;
pub mod compare;
pub mod geometry;
pub mod image;
pub mod pixel_traits;
pub mod primitives;

pub use color::{graya, rgba, Color, OPACITY_MAX};
pub use compare::count_diff_between_images;
pub use geometry::{Clip, Extent, Point, Rect};
pub use image::{Image, ImageBuffer, ImageImpl, Pixels};
pub use pixel_traits::{
    BitmapTraits, GrayscaleTraits, IndexedTraits, PixelFormat, PixelTraits, RgbTraits,
};
pub use primitives::{
    blend_rect, clear_image, copy_image, copy_image_at, crop_image, draw_ellipse, draw_hline,
    draw_line, draw_rect, draw_vline, fill_ellipse, fill_rect, fill_rect_bounds, get_pixel,
    put_pixel, rotate_image, PrimitiveError,
};
