// rasterkit library
// Pixel-format-agnostic raster core plus the demo's config and CLI layers.

pub mod cli;
pub mod config;
pub mod graphics;
pub mod logging;

pub use cli::Cli;
pub use config::Options;
pub use graphics::{Color, Image, ImageBuffer, PixelFormat, PrimitiveError};
pub use logging::LogLevel;
