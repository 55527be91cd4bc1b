use anyhow::{Context, Result};

use crate::graphics::color::{graya, rgba, Color, OPACITY_MAX};
use crate::graphics::geometry::Extent;
use crate::graphics::pixel_traits::PixelFormat;
use crate::logging::LogLevel;

/// Options for the demo renderer, set via CLI or defaults
#[derive(Debug, Clone)]
pub struct Options {
    pub size: Extent,
    pub format: PixelFormat,
    pub background: Color,
    pub foreground: Option<Color>,
    pub opacity: i32,
    pub rotate: Option<i32>,
    pub log_level: LogLevel,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            size: Extent::new(32, 16),
            format: PixelFormat::TrueColor,
            background: 0,
            foreground: None,
            opacity: 128,
            rotate: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Options {
    /// Foreground color, or a visible default for the current format.
    pub fn foreground(&self) -> Color {
        self.foreground
            .unwrap_or_else(|| default_foreground(self.format))
    }
}

/// An opaque "on" color for each format.
pub fn default_foreground(format: PixelFormat) -> Color {
    match format {
        PixelFormat::TrueColor => rgba(255, 255, 255, 255),
        PixelFormat::Grayscale => graya(255, 255),
        PixelFormat::Indexed => 1,
        PixelFormat::Bitmap => 1,
    }
}

/// Load configuration. There is no config file; this returns defaults.
pub fn load_config() -> Result<Options> {
    Ok(Options::default())
}

/// Parse a size string in the format "WIDTHxHEIGHT"
pub fn parse_size(s: &str) -> Result<Extent> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        anyhow::bail!("Size must be in WIDTHxHEIGHT format");
    }

    let width: i32 = parts[0].parse().context("Invalid width value")?;
    let height: i32 = parts[1].parse().context("Invalid height value")?;

    if width < 1 || height < 1 {
        anyhow::bail!("Size values must be positive");
    }

    Ok(Extent::new(width, height))
}

pub fn parse_format(s: &str) -> Result<PixelFormat> {
    match s.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" | "truecolor" => Ok(PixelFormat::TrueColor),
        "gray" | "grayscale" => Ok(PixelFormat::Grayscale),
        "indexed" => Ok(PixelFormat::Indexed),
        "bitmap" => Ok(PixelFormat::Bitmap),
        _ => anyhow::bail!("Unknown pixel format: {}", s),
    }
}

/// Parse a color as decimal or `0x`-prefixed hex
pub fn parse_color(s: &str) -> Result<Color> {
    let s = s.trim();
    let color = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => Color::from_str_radix(hex, 16).context("Invalid hex color")?,
        None => s.parse().context("Invalid color value")?,
    };
    Ok(color)
}

/// Parse an opacity, clamped to 0..=255
pub fn parse_opacity(s: &str) -> Result<i32> {
    let opacity: i32 = s.trim().parse().context("Invalid opacity value")?;
    Ok(opacity.clamp(0, OPACITY_MAX))
}

/// Parse a rotation angle; only quarter and half turns are supported
pub fn parse_angle(s: &str) -> Result<i32> {
    let angle: i32 = s.trim().parse().context("Invalid angle value")?;
    match angle {
        90 | -90 | 180 => Ok(angle),
        _ => anyhow::bail!("Rotation angle must be 90, -90 or 180"),
    }
}
