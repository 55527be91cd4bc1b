//! Color values and blenders
//!
//! A [`Color`] is an opaque 32-bit integer. Its layout depends on the pixel
//! format of the surface it is written to:
//!
//! - TrueColor: `0xAABBGGRR` (r in the low byte)
//! - Grayscale: `0xAAVV` (value in the low byte, alpha in the next)
//! - Indexed: palette index in the low byte
//! - Bitmap: 0 or 1
//!
//! Comparing two colors only makes sense between surfaces of the same format.

/// Opaque pixel value, interpreted per pixel format.
pub type Color = u32;

/// Full-strength opacity for [`rgba_blender_normal`] and friends.
pub const OPACITY_MAX: i32 = 255;

pub const RGBA_R_SHIFT: u32 = 0;
pub const RGBA_G_SHIFT: u32 = 8;
pub const RGBA_B_SHIFT: u32 = 16;
pub const RGBA_A_SHIFT: u32 = 24;
pub const RGBA_RGB_MASK: Color = 0x00ff_ffff;
pub const RGBA_A_MASK: Color = 0xff00_0000;

pub const GRAYA_V_SHIFT: u32 = 0;
pub const GRAYA_A_SHIFT: u32 = 8;
pub const GRAYA_V_MASK: Color = 0x00ff;
pub const GRAYA_A_MASK: Color = 0xff00;

pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    ((r as Color) << RGBA_R_SHIFT)
        | ((g as Color) << RGBA_G_SHIFT)
        | ((b as Color) << RGBA_B_SHIFT)
        | ((a as Color) << RGBA_A_SHIFT)
}

pub const fn rgba_getr(c: Color) -> u8 {
    ((c >> RGBA_R_SHIFT) & 0xff) as u8
}

pub const fn rgba_getg(c: Color) -> u8 {
    ((c >> RGBA_G_SHIFT) & 0xff) as u8
}

pub const fn rgba_getb(c: Color) -> u8 {
    ((c >> RGBA_B_SHIFT) & 0xff) as u8
}

pub const fn rgba_geta(c: Color) -> u8 {
    ((c >> RGBA_A_SHIFT) & 0xff) as u8
}

pub const fn graya(v: u8, a: u8) -> Color {
    ((v as Color) << GRAYA_V_SHIFT) | ((a as Color) << GRAYA_A_SHIFT)
}

pub const fn graya_getv(c: Color) -> u8 {
    ((c >> GRAYA_V_SHIFT) & 0xff) as u8
}

pub const fn graya_geta(c: Color) -> u8 {
    ((c >> GRAYA_A_SHIFT) & 0xff) as u8
}

/// Multiply two 8-bit unit values, rounding to nearest (`a * b / 255`).
#[inline]
pub fn mul_un8(a: i32, b: i32) -> i32 {
    let t = a * b + 0x80;
    ((t >> 8) + t) >> 8
}

fn clamp_opacity(opacity: i32) -> i32 {
    opacity.clamp(0, OPACITY_MAX)
}

/// Composite `src` over `backdrop` with the given opacity (0..=255).
///
/// An effective source alpha of zero returns the backdrop untouched.
pub fn rgba_blender_normal(backdrop: Color, src: Color, opacity: i32) -> Color {
    let sa = mul_un8(rgba_geta(src) as i32, clamp_opacity(opacity));
    if sa == 0 {
        return backdrop;
    }

    if backdrop & RGBA_A_MASK == 0 {
        return (src & RGBA_RGB_MASK) | ((sa as Color) << RGBA_A_SHIFT);
    }

    let br = rgba_getr(backdrop) as i32;
    let bg = rgba_getg(backdrop) as i32;
    let bb = rgba_getb(backdrop) as i32;
    let ba = rgba_geta(backdrop) as i32;

    let sr = rgba_getr(src) as i32;
    let sg = rgba_getg(src) as i32;
    let sb = rgba_getb(src) as i32;

    let ra = ba + sa - mul_un8(ba, sa);
    let rr = br + (sr - br) * sa / ra;
    let rg = bg + (sg - bg) * sa / ra;
    let rb = bb + (sb - bb) * sa / ra;

    rgba(rr as u8, rg as u8, rb as u8, ra as u8)
}

/// Gray+alpha counterpart of [`rgba_blender_normal`].
pub fn graya_blender_normal(backdrop: Color, src: Color, opacity: i32) -> Color {
    let sa = mul_un8(graya_geta(src) as i32, clamp_opacity(opacity));
    if sa == 0 {
        return backdrop;
    }

    if backdrop & GRAYA_A_MASK == 0 {
        return (src & GRAYA_V_MASK) | ((sa as Color) << GRAYA_A_SHIFT);
    }

    let bv = graya_getv(backdrop) as i32;
    let ba = graya_geta(backdrop) as i32;
    let sv = graya_getv(src) as i32;

    let ra = ba + sa - mul_un8(ba, sa);
    let rv = bv + (sv - bv) * sa / ra;

    graya(rv as u8, ra as u8)
}
