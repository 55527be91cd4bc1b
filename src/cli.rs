use crate::config::{parse_angle, parse_color, parse_format, parse_opacity, parse_size, Options};
use crate::logging::LogLevel;
use anyhow::{Context, Result};
use clap::Parser;

/// rasterkit - draw a test scene with the raster primitives
#[derive(Parser, Debug, Default)]
#[command(name = "rasterkit")]
#[command(version)]
#[command(about = "Draws a fixed scene into an image surface and prints it as ASCII", long_about = None)]
pub struct Cli {
    /// Surface size (e.g., 32x16)
    #[arg(short, long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Pixel format (rgb, gray, indexed, bitmap)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Background color, decimal or 0x hex
    #[arg(short, long, value_name = "COLOR")]
    pub bg: Option<String>,

    /// Foreground color, decimal or 0x hex
    #[arg(long, value_name = "COLOR")]
    pub fg: Option<String>,

    /// Opacity for the blended rectangle (0-255)
    #[arg(short, long, value_name = "OPACITY")]
    pub opacity: Option<String>,

    /// Rotate the finished scene (90, -90, 180)
    #[arg(short, long, value_name = "ANGLE", allow_hyphen_values = true)]
    pub rotate: Option<String>,

    /// Log level (0 = nothing, 6 = everything)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<i32>,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref size) = self.size {
            opts.size = parse_size(size).context("Invalid size format")?;
        }

        if let Some(ref format) = self.format {
            opts.format = parse_format(format)?;
        }

        if let Some(ref bg) = self.bg {
            opts.background = parse_color(bg).context("Invalid background color")?;
        }

        if let Some(ref fg) = self.fg {
            opts.foreground = Some(parse_color(fg).context("Invalid foreground color")?);
        }

        if let Some(ref opacity) = self.opacity {
            opts.opacity = parse_opacity(opacity)?;
        }

        if let Some(ref angle) = self.rotate {
            opts.rotate = Some(parse_angle(angle)?);
        }

        if let Some(level) = self.log_level {
            opts.log_level = LogLevel::from_i32(level);
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Extent, PixelFormat};

    #[test]
    fn test_merge_basic_options() {
        let cli = Cli {
            size: Some("8x6".to_string()),
            format: Some("bitmap".to_string()),
            rotate: Some("-90".to_string()),
            ..Default::default()
        };

        let opts = cli.merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.size, Extent::new(8, 6));
        assert_eq!(opts.format, PixelFormat::Bitmap);
        assert_eq!(opts.rotate, Some(-90));
        assert_eq!(opts.opacity, 128);
    }

    #[test]
    fn test_merge_colors_and_level() {
        let cli = Cli {
            bg: Some("0x10".to_string()),
            fg: Some("7".to_string()),
            opacity: Some("300".to_string()),
            log_level: Some(5),
            ..Default::default()
        };

        let opts = cli.merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.background, 16);
        assert_eq!(opts.foreground(), 7);
        assert_eq!(opts.opacity, 255);
        assert_eq!(opts.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_empty_cli_keeps_defaults() {
        let opts = Cli::default().merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.size, Options::default().size);
        assert!(opts.rotate.is_none());
    }

    #[test]
    fn test_invalid_size() {
        let cli = Cli {
            size: Some("invalid".to_string()),
            ..Default::default()
        };

        let result = cli.merge_into_options(Options::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_angle() {
        let cli = Cli {
            rotate: Some("45".to_string()),
            ..Default::default()
        };
        assert!(cli.merge_into_options(Options::default()).is_err());
    }

    #[test]
    fn test_parse_from_args() {
        let cli = Cli::try_parse_from(["rasterkit", "-s", "4x4", "-r", "-90", "-f", "gray"]).unwrap();
        assert_eq!(cli.size.as_deref(), Some("4x4"));
        assert_eq!(cli.rotate.as_deref(), Some("-90"));
        assert_eq!(cli.format.as_deref(), Some("gray"));
    }
}
