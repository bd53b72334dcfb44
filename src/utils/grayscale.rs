/// Convert RGB frames to grayscale
/// Y = 0.299*R + 0.587*G + 0.114*B
/// Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
use image::{GrayImage, RgbImage};
use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: i32 = 76;
const COEF_G: i32 = 150;
const COEF_B: i32 = 29;

/// Frames at or above this pixel count are converted row-parallel
const PARALLEL_MIN_PIXELS: usize = 320 * 240;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as i32 + COEF_G * g as i32 + COEF_B * b as i32) >> 8;
    lum.min(255) as u8
}

/// Convert packed RGB bytes to grayscale on the calling thread
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    rgb.chunks_exact(3)
        .take(pixel_count)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Convert RGB to grayscale using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];
    if width == 0 || rgb.len() < pixel_count * 3 {
        return gray;
    }

    // Process rows in parallel
    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 3;
        let src = &rgb[row_start..row_start + width * 3];
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(3)) {
            *dst = luma(px[0], px[1], px[2]);
        }
    });

    gray
}

/// Convert a color frame to a grayscale image, going parallel on large frames
pub fn frame_to_gray(frame: &RgbImage) -> GrayImage {
    let (width, height) = frame.dimensions();
    let (w, h) = (width as usize, height as usize);
    let data = if w * h >= PARALLEL_MIN_PIXELS {
        rgb_to_grayscale_parallel(frame.as_raw(), w, h)
    } else {
        rgb_to_grayscale(frame.as_raw(), w, h)
    };
    // The buffer length is exactly width * height by construction
    GrayImage::from_raw(width, height, data).unwrap_or_else(|| GrayImage::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        // Pure white
        let white = vec![255, 255, 255];
        let gray = rgb_to_grayscale(&white, 1, 1);
        assert!(gray[0] >= 254);

        // Pure black
        let black = vec![0, 0, 0];
        let gray = rgb_to_grayscale(&black, 1, 1);
        assert_eq!(gray[0], 0);

        // Pure red
        let red = vec![255, 0, 0];
        let gray = rgb_to_grayscale(&red, 1, 1);
        assert!(gray[0] < 255);
        assert!(gray[0] > 0);

        // 2x2 image
        let img = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let gray = rgb_to_grayscale(&img, 2, 2);
        assert_eq!(gray.len(), 4);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (w, h) = (37usize, 11usize);
        let rgb: Vec<u8> = (0..w * h * 3).map(|i| (i * 31 % 256) as u8).collect();
        assert_eq!(rgb_to_grayscale(&rgb, w, h), rgb_to_grayscale_parallel(&rgb, w, h));
    }

    #[test]
    fn test_frame_to_gray_dimensions() {
        let frame = RgbImage::from_pixel(640, 480, image::Rgb([0, 255, 0]));
        let gray = frame_to_gray(&frame);
        assert_eq!(gray.dimensions(), (640, 480));
        assert!(gray.get_pixel(10, 10)[0] > 100);
    }
}
