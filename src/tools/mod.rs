use crate::error::Result;
use crate::models::StickerGrid;
use crate::pipeline::FrameReport;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::fs;
use std::path::{Path, PathBuf};

/// Outline color for located stickers
pub const STICKER_CONTOUR_COLOR: Rgb<u8> = Rgb([12, 255, 36]);

/// Outline thickness in pixels
pub const STICKER_CONTOUR_THICKNESS: u32 = 2;

/// Nominal capture width the default size window is tuned for
pub const NOMINAL_FRAME_WIDTH: u32 = 640;

/// Load an image file as an RGB frame.
///
/// With `max_width` set, wider frames are downscaled to that width so the
/// sticker size window keeps matching the nominal capture resolution.
pub fn load_rgb<P: AsRef<Path>>(path: P, max_width: Option<u32>) -> Result<RgbImage> {
    let img = image::open(path)?;
    let rgb = img.to_rgb8();
    Ok(match max_width {
        Some(max) => fit_width(&rgb, max),
        None => rgb,
    })
}

/// Downscale `frame` to `max_width` keeping its aspect ratio; narrower frames are returned as-is
pub fn fit_width(frame: &RgbImage, max_width: u32) -> RgbImage {
    let (w, h) = frame.dimensions();
    if max_width == 0 || w <= max_width {
        return frame.clone();
    }
    let new_h = ((h as f32 * max_width as f32 / w as f32).round() as u32).max(1);
    image::imageops::resize(frame, max_width, new_h, image::imageops::FilterType::Triangle)
}

/// Draw the outline of every sticker in `grid` onto `frame`
pub fn draw_grid(frame: &mut RgbImage, grid: &StickerGrid, color: Rgb<u8>, thickness: u32) {
    for sticker in grid {
        for inset in 0..thickness as i32 {
            let w = sticker.w - 2 * inset;
            let h = sticker.h - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = Rect::at(sticker.x + inset, sticker.y + inset).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(frame, rect, color);
        }
    }
}

/// Write per-frame reports as pretty-printed JSON
pub fn write_report<P: AsRef<Path>>(path: P, reports: &[FrameReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    fs::write(path, json)?;
    Ok(())
}

/// Recursively collect image files under `root`
pub fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "bmp" {
                    images.push(path);
                }
            }
        }
    }

    images
}
