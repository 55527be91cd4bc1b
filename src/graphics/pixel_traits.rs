//! Pixel formats and their compile-time codecs
//!
//! Every surface stores its pixels as raw bytes. A [`PixelTraits`] type knows
//! how one pixel of its format is laid out inside a row and how it maps to and
//! from a [`Color`]. Code that is generic over `T: PixelTraits` gets one
//! monomorphized copy per format, so per-pixel loops carry no dynamic dispatch.

use std::fmt;

use crate::graphics::color::{
    graya_blender_normal, rgba_blender_normal, Color, GRAYA_A_MASK, GRAYA_V_MASK,
};

/// Pixel format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 32-bit RGBA
    TrueColor,
    /// 8-bit value + 8-bit alpha
    Grayscale,
    /// 8-bit palette index
    Indexed,
    /// 1-bit mask, 8 pixels per byte
    Bitmap,
}

impl PixelFormat {
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::TrueColor => 32,
            PixelFormat::Grayscale => 16,
            PixelFormat::Indexed => 8,
            PixelFormat::Bitmap => 1,
        }
    }

    /// The value a surface of this format actually stores for `color`.
    pub fn truncate(&self, color: Color) -> Color {
        match self {
            PixelFormat::TrueColor => RgbTraits::to_color(RgbTraits::from_color(color)),
            PixelFormat::Grayscale => GrayscaleTraits::to_color(GrayscaleTraits::from_color(color)),
            PixelFormat::Indexed => IndexedTraits::to_color(IndexedTraits::from_color(color)),
            PixelFormat::Bitmap => BitmapTraits::to_color(BitmapTraits::from_color(color)),
        }
    }

    /// Row size in bytes for an image `width` pixels wide.
    pub fn row_stride(&self, width: usize) -> usize {
        match self {
            PixelFormat::TrueColor => RgbTraits::row_stride(width),
            PixelFormat::Grayscale => GrayscaleTraits::row_stride(width),
            PixelFormat::Indexed => IndexedTraits::row_stride(width),
            PixelFormat::Bitmap => BitmapTraits::row_stride(width),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::TrueColor => "rgb",
            PixelFormat::Grayscale => "grayscale",
            PixelFormat::Indexed => "indexed",
            PixelFormat::Bitmap => "bitmap",
        };
        f.write_str(name)
    }
}

/// Storage codec for a single pixel format.
pub trait PixelTraits: 'static {
    const FORMAT: PixelFormat;

    /// In-memory value of one pixel.
    type Pixel: Copy + PartialEq + fmt::Debug;

    /// Bytes needed for one row of `width` pixels.
    fn row_stride(width: usize) -> usize;

    /// Read pixel `x` from a row slice.
    fn read(row: &[u8], x: usize) -> Self::Pixel;

    /// Write pixel `x` into a row slice.
    fn write(row: &mut [u8], x: usize, pixel: Self::Pixel);

    /// Truncate a color to what this format can hold.
    fn from_color(color: Color) -> Self::Pixel;

    fn to_color(pixel: Self::Pixel) -> Color;

    /// Combine `src` over `backdrop`. Opacity 0 must return `backdrop`.
    fn blend(backdrop: Self::Pixel, src: Self::Pixel, opacity: i32) -> Self::Pixel;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbTraits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayscaleTraits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedTraits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapTraits;

impl PixelTraits for RgbTraits {
    const FORMAT: PixelFormat = PixelFormat::TrueColor;
    type Pixel = u32;

    #[inline]
    fn row_stride(width: usize) -> usize {
        width * 4
    }

    #[inline]
    fn read(row: &[u8], x: usize) -> u32 {
        let b = &row[x * 4..x * 4 + 4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    #[inline]
    fn write(row: &mut [u8], x: usize, pixel: u32) {
        row[x * 4..x * 4 + 4].copy_from_slice(&pixel.to_le_bytes());
    }

    #[inline]
    fn from_color(color: Color) -> u32 {
        color
    }

    #[inline]
    fn to_color(pixel: u32) -> Color {
        pixel
    }

    #[inline]
    fn blend(backdrop: u32, src: u32, opacity: i32) -> u32 {
        rgba_blender_normal(backdrop, src, opacity)
    }
}

impl PixelTraits for GrayscaleTraits {
    const FORMAT: PixelFormat = PixelFormat::Grayscale;
    type Pixel = u16;

    #[inline]
    fn row_stride(width: usize) -> usize {
        width * 2
    }

    #[inline]
    fn read(row: &[u8], x: usize) -> u16 {
        u16::from_le_bytes([row[x * 2], row[x * 2 + 1]])
    }

    #[inline]
    fn write(row: &mut [u8], x: usize, pixel: u16) {
        row[x * 2..x * 2 + 2].copy_from_slice(&pixel.to_le_bytes());
    }

    #[inline]
    fn from_color(color: Color) -> u16 {
        (color & (GRAYA_V_MASK | GRAYA_A_MASK)) as u16
    }

    #[inline]
    fn to_color(pixel: u16) -> Color {
        pixel as Color
    }

    #[inline]
    fn blend(backdrop: u16, src: u16, opacity: i32) -> u16 {
        graya_blender_normal(backdrop as Color, src as Color, opacity) as u16
    }
}

impl PixelTraits for IndexedTraits {
    const FORMAT: PixelFormat = PixelFormat::Indexed;
    type Pixel = u8;

    #[inline]
    fn row_stride(width: usize) -> usize {
        width
    }

    #[inline]
    fn read(row: &[u8], x: usize) -> u8 {
        row[x]
    }

    #[inline]
    fn write(row: &mut [u8], x: usize, pixel: u8) {
        row[x] = pixel;
    }

    #[inline]
    fn from_color(color: Color) -> u8 {
        (color & 0xff) as u8
    }

    #[inline]
    fn to_color(pixel: u8) -> Color {
        pixel as Color
    }

    // Palette indices cannot be mixed; any visible opacity paints.
    #[inline]
    fn blend(backdrop: u8, src: u8, opacity: i32) -> u8 {
        if opacity > 0 {
            src
        } else {
            backdrop
        }
    }
}

impl PixelTraits for BitmapTraits {
    const FORMAT: PixelFormat = PixelFormat::Bitmap;
    type Pixel = u8;

    #[inline]
    fn row_stride(width: usize) -> usize {
        width.div_ceil(8)
    }

    #[inline]
    fn read(row: &[u8], x: usize) -> u8 {
        (row[x / 8] >> (x % 8)) & 1
    }

    #[inline]
    fn write(row: &mut [u8], x: usize, pixel: u8) {
        let bit = 1u8 << (x % 8);
        if pixel != 0 {
            row[x / 8] |= bit;
        } else {
            row[x / 8] &= !bit;
        }
    }

    #[inline]
    fn from_color(color: Color) -> u8 {
        (color != 0) as u8
    }

    #[inline]
    fn to_color(pixel: u8) -> Color {
        pixel as Color
    }

    #[inline]
    fn blend(backdrop: u8, src: u8, opacity: i32) -> u8 {
        if opacity > 0 {
            src
        } else {
            backdrop
        }
    }
}
