//! Edge-mask production
//!
//! grayscale -> 3x3 box blur -> Canny -> 9x9 square dilation. Dilation closes
//! the small gaps Canny leaves at sticker corners so each sticker interior
//! becomes one enclosed hole in the mask.

use super::grayscale::frame_to_gray;
use crate::config::PreprocessConfig;
use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::box_filter;
use imageproc::morphology::dilate;

/// Binary edge mask (0 = background, 255 = edge) with the frame's dimensions
pub fn to_edge_mask(frame: &RgbImage, config: &PreprocessConfig) -> GrayImage {
    let gray = frame_to_gray(frame);
    gray_to_edge_mask(&gray, config)
}

/// Same as [`to_edge_mask`] for a frame that is already grayscale.
///
/// An empty frame yields an empty mask. Swapped thresholds are reordered.
pub fn gray_to_edge_mask(gray: &GrayImage, config: &PreprocessConfig) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return GrayImage::new(width, height);
    }

    let (low, high) = hysteresis_thresholds(config);
    let blurred = box_filter(gray, config.blur_radius, config.blur_radius);
    let edges = canny(&blurred, low, high);
    dilate(&edges, Norm::LInf, config.dilate_radius)
}

/// `(low, high)` with `low <= high`; non-finite values fall back to the defaults
fn hysteresis_thresholds(config: &PreprocessConfig) -> (f32, f32) {
    let defaults = PreprocessConfig::default();
    let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
    let low = finite_or(config.canny_low, defaults.canny_low);
    let high = finite_or(config.canny_high, defaults.canny_high);
    (low.min(high), low.max(high))
}
