use anyhow::{Context, Result};
use clap::Parser;

use rasterkit::cli::Cli;
use rasterkit::config::{self, Options};
use rasterkit::graphics::{
    blend_rect, clear_image, count_diff_between_images, draw_ellipse, draw_line, draw_rect,
    fill_ellipse, fill_rect, get_pixel, rotate_image, Image,
};
use rasterkit::logging;
use rasterkit::{log_debug, log_error, log_info, log_warning};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Options come first so the log level is known
    let options = config::load_config()?;
    let options = cli.merge_into_options(options)?;
    logging::log_init(options.log_level);

    log_info!(
        "Drawing {}x{} {} scene ({} bpp)",
        options.size.width,
        options.size.height,
        options.format,
        options.format.bits_per_pixel()
    );

    let scene = draw_scene(&options);
    let (shown, diff) = match options.rotate {
        Some(angle) => {
            let rotated = rotated(&scene, angle).inspect_err(|e| log_error!("{:#}", e))?;
            let restored = rotated_back(&rotated, angle).inspect_err(|e| log_error!("{:#}", e))?;
            let diff = count_diff_between_images(&scene, &restored)
                .context("Round-tripped image is not comparable")?;
            if diff > 0 {
                log_warning!("Rotation by {} did not round-trip: {} pixels differ", angle, diff);
            }
            (rotated, Some(diff))
        }
        None => (scene, None),
    };

    print!("{}", to_ascii(&shown));
    if let Some(diff) = diff {
        println!("round-trip differences: {}", diff);
    }

    Ok(())
}

/// Render the fixed test scene with every primitive.
fn draw_scene(options: &Options) -> Image {
    let (w, h) = (options.size.width, options.size.height);
    let fg = options.foreground();

    let mut image = Image::create(options.format, w, h, None);
    image.set_mask_color(options.background);
    clear_image(&mut image, options.background);

    draw_rect(&mut image, 0, 0, w - 1, h - 1, fg);
    fill_rect(&mut image, 2, 2, w / 3, h / 2, fg);
    blend_rect(&mut image, w / 4, h / 4, w / 2, h - 3, fg, options.opacity);
    draw_line(&mut image, 0, h - 1, w - 1, 0, fg);
    draw_ellipse(&mut image, w / 2, 1, w - 2, h - 2, fg);
    fill_ellipse(&mut image, w * 2 / 3, h / 3, w - 4, h * 2 / 3, fg);

    log_debug!("Scene drawn, mask color {:#x}", image.mask_color());
    image
}

fn rotated(src: &Image, angle: i32) -> Result<Image> {
    let (w, h) = match angle {
        180 => (src.width(), src.height()),
        _ => (src.height(), src.width()),
    };
    let mut dst = Image::create(src.pixel_format(), w, h, None);
    dst.set_mask_color(src.mask_color());
    rotate_image(src, &mut dst, angle).with_context(|| format!("Failed to rotate by {}", angle))?;
    Ok(dst)
}

fn rotated_back(src: &Image, angle: i32) -> Result<Image> {
    let inverse = if angle == 180 { 180 } else { -angle };
    rotated(src, inverse)
}

/// One text row per pixel row: `.` for the mask color, `#` otherwise.
fn to_ascii(image: &Image) -> String {
    // Compare against what the surface can actually hold.
    let mask = image.pixel_format().truncate(image.mask_color());
    let mut out = String::with_capacity((image.width() as usize + 1) * image.height() as usize);
    for y in 0..image.height() {
        for x in 0..image.width() {
            let on = get_pixel(image, x, y).is_some_and(|c| c != mask);
            out.push(if on { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
