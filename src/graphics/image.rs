//! Image surfaces
//!
//! An [`Image`] owns a row-major byte buffer in one of four pixel formats.
//! The format-specific work lives in [`ImageImpl<T>`], which is generic over
//! a [`PixelTraits`] codec; [`Image`] is a thin enum that picks the right
//! monomorphized implementation once per call.
//!
//! The `*_unchecked` and batch methods here trust their coordinates. Callers
//! outside this crate should go through [`crate::graphics::primitives`],
//! which clips first. A bad coordinate reaching this layer trips a debug
//! assertion or a slice bounds check; it never touches memory outside the
//! buffer.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::graphics::color::Color;
use crate::graphics::geometry::{Clip, Extent, Rect};
use crate::graphics::pixel_traits::{
    BitmapTraits, GrayscaleTraits, IndexedTraits, PixelFormat, PixelTraits, RgbTraits,
};

/// Reusable pixel allocation.
///
/// Handing one to [`Image::create`] lets repeated operations (crops in a loop,
/// for example) reuse the same heap block. [`Image::into_buffer`] gives it
/// back once the image is no longer needed.
#[derive(Debug, Default, Clone)]
pub struct ImageBuffer {
    bytes: Vec<u8>,
}

impl ImageBuffer {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Surface storage for a single pixel format.
#[derive(Clone)]
pub struct ImageImpl<T: PixelTraits> {
    width: i32,
    height: i32,
    stride: usize,
    mask_color: Color,
    bytes: Vec<u8>,
    _traits: PhantomData<T>,
}

impl<T: PixelTraits> ImageImpl<T> {
    /// Allocate a zero-filled surface. Dimensions below 1 are raised to 1.
    pub fn new(width: i32, height: i32, buffer: Option<ImageBuffer>) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let stride = T::row_stride(width as usize);

        let mut bytes = buffer.map(|b| b.bytes).unwrap_or_default();
        bytes.clear();
        bytes.resize(stride * height as usize, 0);

        Self {
            width,
            height,
            stride,
            mask_color: 0,
            bytes,
            _traits: PhantomData,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    pub fn mask_color(&self) -> Color {
        self.mask_color
    }

    pub fn set_mask_color(&mut self, color: Color) {
        self.mask_color = color;
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn row(&self, y: i32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.bytes[start..start + self.stride]
    }

    #[inline]
    fn row_mut(&mut self, y: i32) -> &mut [u8] {
        let start = y as usize * self.stride;
        &mut self.bytes[start..start + self.stride]
    }

    #[inline]
    fn debug_check(&self, x: i32, y: i32) {
        debug_assert!(
            x >= 0 && y >= 0 && x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} surface",
            x,
            y,
            self.width,
            self.height
        );
    }

    #[inline]
    pub fn get_pixel_unchecked(&self, x: i32, y: i32) -> Color {
        self.debug_check(x, y);
        T::to_color(T::read(self.row(y), x as usize))
    }

    #[inline]
    pub fn put_pixel_unchecked(&mut self, x: i32, y: i32, color: Color) {
        self.debug_check(x, y);
        T::write(self.row_mut(y), x as usize, T::from_color(color));
    }

    pub fn clear(&mut self, color: Color) {
        let pixel = T::from_color(color);
        let width = self.width as usize;
        for row in self.bytes.chunks_exact_mut(self.stride) {
            for x in 0..width {
                T::write(row, x, pixel);
            }
        }
    }

    /// Inclusive span `x1..=x2` on row `y`.
    pub fn draw_hline(&mut self, x1: i32, y: i32, x2: i32, color: Color) {
        self.debug_check(x1, y);
        self.debug_check(x2, y);
        let pixel = T::from_color(color);
        let row = self.row_mut(y);
        for x in x1..=x2 {
            T::write(row, x as usize, pixel);
        }
    }

    /// Inclusive rectangle `(x1, y1)..=(x2, y2)`.
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        for y in y1..=y2 {
            self.draw_hline(x1, y, x2, color);
        }
    }

    pub fn blend_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color, opacity: i32) {
        self.debug_check(x1, y1);
        self.debug_check(x2, y2);
        let src = T::from_color(color);
        for y in y1..=y2 {
            let row = self.row_mut(y);
            for x in x1..=x2 {
                let x = x as usize;
                let back = T::read(row, x);
                T::write(row, x, T::blend(back, src, opacity));
            }
        }
    }

    /// Copy `clip.src` from `src` to `clip.dst` on this surface.
    ///
    /// The clip is trimmed against both surfaces first.
    pub fn copy(&mut self, src: &ImageImpl<T>, mut clip: Clip) {
        if !clip.clip(self.extent(), src.extent()) {
            return;
        }

        let (dx, dy) = (clip.dst.x, clip.dst.y);
        let (sx, sy) = (clip.src.corner.x, clip.src.corner.y);
        let (w, h) = (clip.src.extent.width, clip.src.extent.height);

        for v in 0..h {
            let src_row = src.row(sy + v);
            let dst_row = self.row_mut(dy + v);
            for u in 0..w {
                T::write(dst_row, (dx + u) as usize, T::read(src_row, (sx + u) as usize));
            }
        }
    }

    /// Row-major stream of raw pixels.
    pub fn pixels(&self) -> Pixels<'_, T> {
        Pixels {
            image: self,
            x: 0,
            y: 0,
            remaining: self.width as usize * self.height as usize,
        }
    }

    pub fn into_buffer(self) -> ImageBuffer {
        ImageBuffer { bytes: self.bytes }
    }
}

impl<T: PixelTraits> fmt::Debug for ImageImpl<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageImpl")
            .field("format", &T::FORMAT)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mask_color", &self.mask_color)
            .finish()
    }
}

/// Iterator over an image's pixels, left to right, top to bottom.
pub struct Pixels<'a, T: PixelTraits> {
    image: &'a ImageImpl<T>,
    x: i32,
    y: i32,
    remaining: usize,
}

impl<T: PixelTraits> Iterator for Pixels<'_, T> {
    type Item = T::Pixel;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pixel = T::read(self.image.row(self.y), self.x as usize);
        self.remaining -= 1;
        self.x += 1;
        if self.x == self.image.width {
            self.x = 0;
            self.y += 1;
        }
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: PixelTraits> ExactSizeIterator for Pixels<'_, T> {}

impl<T: PixelTraits> FusedIterator for Pixels<'_, T> {}

/// An image surface in any supported pixel format.
#[derive(Clone, Debug)]
pub enum Image {
    Rgb(ImageImpl<RgbTraits>),
    Grayscale(ImageImpl<GrayscaleTraits>),
    Indexed(ImageImpl<IndexedTraits>),
    Bitmap(ImageImpl<BitmapTraits>),
}

macro_rules! with_impl {
    ($image:expr, $inner:ident => $body:expr) => {
        match $image {
            Image::Rgb($inner) => $body,
            Image::Grayscale($inner) => $body,
            Image::Indexed($inner) => $body,
            Image::Bitmap($inner) => $body,
        }
    };
}

impl Image {
    /// Surface factory. `buffer`, when given, donates its allocation.
    pub fn create(format: PixelFormat, width: i32, height: i32, buffer: Option<ImageBuffer>) -> Self {
        match format {
            PixelFormat::TrueColor => Image::Rgb(ImageImpl::new(width, height, buffer)),
            PixelFormat::Grayscale => Image::Grayscale(ImageImpl::new(width, height, buffer)),
            PixelFormat::Indexed => Image::Indexed(ImageImpl::new(width, height, buffer)),
            PixelFormat::Bitmap => Image::Bitmap(ImageImpl::new(width, height, buffer)),
        }
    }

    pub fn pixel_format(&self) -> PixelFormat {
        match self {
            Image::Rgb(_) => PixelFormat::TrueColor,
            Image::Grayscale(_) => PixelFormat::Grayscale,
            Image::Indexed(_) => PixelFormat::Indexed,
            Image::Bitmap(_) => PixelFormat::Bitmap,
        }
    }

    pub fn width(&self) -> i32 {
        with_impl!(self, img => img.width())
    }

    pub fn height(&self) -> i32 {
        with_impl!(self, img => img.height())
    }

    pub fn extent(&self) -> Extent {
        with_impl!(self, img => img.extent())
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    pub fn mask_color(&self) -> Color {
        with_impl!(self, img => img.mask_color())
    }

    pub fn set_mask_color(&mut self, color: Color) {
        with_impl!(self, img => img.set_mask_color(color))
    }

    pub fn get_pixel_unchecked(&self, x: i32, y: i32) -> Color {
        with_impl!(self, img => img.get_pixel_unchecked(x, y))
    }

    pub fn put_pixel_unchecked(&mut self, x: i32, y: i32, color: Color) {
        with_impl!(self, img => img.put_pixel_unchecked(x, y, color))
    }

    pub fn clear(&mut self, color: Color) {
        with_impl!(self, img => img.clear(color))
    }

    pub fn draw_hline(&mut self, x1: i32, y: i32, x2: i32, color: Color) {
        with_impl!(self, img => img.draw_hline(x1, y, x2, color))
    }

    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        with_impl!(self, img => img.fill_rect(x1, y1, x2, y2, color))
    }

    pub fn blend_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color, opacity: i32) {
        with_impl!(self, img => img.blend_rect(x1, y1, x2, y2, color, opacity))
    }

    /// Same-format region copy. A format mismatch copies nothing.
    pub fn copy(&mut self, src: &Image, clip: Clip) {
        match (self, src) {
            (Image::Rgb(dst), Image::Rgb(src)) => dst.copy(src, clip),
            (Image::Grayscale(dst), Image::Grayscale(src)) => dst.copy(src, clip),
            (Image::Indexed(dst), Image::Indexed(src)) => dst.copy(src, clip),
            (Image::Bitmap(dst), Image::Bitmap(src)) => dst.copy(src, clip),
            (dst, src) => {
                log::warn!(
                    "copy between mismatched formats ignored: {} <- {}",
                    dst.pixel_format(),
                    src.pixel_format()
                );
            }
        }
    }

    pub fn into_buffer(self) -> ImageBuffer {
        with_impl!(self, img => img.into_buffer())
    }
}
