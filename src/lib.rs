//! cube_grid - locate the sticker grid of a puzzle cube face
//!
//! A frame is reduced to an edge mask, the mask's contours are filtered down
//! to sticker-shaped boxes, and the boxes are searched for one whose eight
//! grid neighbors are all present. The nine boxes come back in row-major
//! order, top-left to bottom-right.
//!
//! Detection is stateless: every call depends only on its input, so frames
//! may be processed concurrently.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detector configuration (size windows, slot radius, preprocessing)
pub mod config;
/// Square filter and grid locator
pub mod detector;
/// Crate error type
pub mod error;
/// Core data structures (BoundingBox, StickerGrid, Point, etc.)
pub mod models;
/// Sequential frame loop over a frame source
pub mod pipeline;
/// Image loading, rendering and report helpers for the CLI
pub mod tools;
/// Utility functions (grayscale, edge mask, contours, geometry)
pub mod utils;

pub use config::{DetectorConfig, GridConfig, PreprocessConfig, SquareFilterConfig};
pub use detector::{filter_squares, locate_grid};
pub use error::{Error, Result};
pub use models::{BoundingBox, Point, PointI, PolygonCandidate, StickerGrid};

use image::{GrayImage, RgbImage};
use rayon::prelude::*;
use serde::Serialize;
use utils::contours::extract_polygons;
use utils::preprocess::{gray_to_edge_mask, to_edge_mask};

/// Detect a cube face in packed RGB bytes using the default configuration
///
/// # Arguments
/// * `image` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// The nine sticker boxes in row-major order, or `None` when no face is
/// visible or the buffer does not match the given dimensions
pub fn detect(image: &[u8], width: usize, height: usize) -> Option<StickerGrid> {
    let frame = rgb_frame(image, width, height)?;
    Detector::new().detect_frame(&frame)
}

/// Detect a cube face in a pre-computed grayscale image
///
/// # Arguments
/// * `image` - Grayscale bytes (1 byte per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn detect_from_grayscale(image: &[u8], width: usize, height: usize) -> Option<StickerGrid> {
    let gray = gray_frame(image, width, height)?;
    Detector::new().detect_gray(&gray)
}

/// Wrap packed RGB bytes; `None` when the size overflows `u32` or the buffer is short
fn rgb_frame(image: &[u8], width: usize, height: usize) -> Option<RgbImage> {
    let (width, height) = (u32::try_from(width).ok()?, u32::try_from(height).ok()?);
    RgbImage::from_raw(width, height, image.to_vec())
}

fn gray_frame(image: &[u8], width: usize, height: usize) -> Option<GrayImage> {
    let (width, height) = (u32::try_from(width).ok()?, u32::try_from(height).ok()?);
    GrayImage::from_raw(width, height, image.to_vec())
}

/// Per-stage counters for one detection call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectionTelemetry {
    /// Contours traced in the edge mask
    pub contours: usize,
    /// Contours that simplified to quadrilaterals
    pub quadrilaterals: usize,
    /// Quadrilaterals accepted as sticker candidates
    pub candidates: usize,
    /// Highest neighbor count reached by any candidate
    pub best_neighbor_count: usize,
    /// Whether a full grid was located
    pub grid_found: bool,
}

/// Cube face detector
///
/// Holds nothing but its configuration; two detectors with equal configs
/// behave identically and a detector can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Create a detector with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a specific configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the square filter and grid locator on already-extracted contours
    pub fn detect_polygons(&self, polygons: &[PolygonCandidate]) -> Option<StickerGrid> {
        self.detect_polygons_with_telemetry(polygons).0
    }

    /// Like [`Detector::detect_polygons`] but also returns stage counters
    pub fn detect_polygons_with_telemetry(
        &self,
        polygons: &[PolygonCandidate],
    ) -> (Option<StickerGrid>, DetectionTelemetry) {
        let (candidates, stats) =
            detector::filter_squares_with_stats(polygons, &self.config.square);
        let search = detector::search_grid(&candidates, &self.config.grid);

        let telemetry = DetectionTelemetry {
            contours: stats.contours,
            quadrilaterals: stats.quadrilaterals,
            candidates: stats.accepted,
            best_neighbor_count: search.best_neighbor_count,
            grid_found: search.grid.is_some(),
        };
        (search.grid, telemetry)
    }

    /// Detect a cube face in a color frame
    pub fn detect_frame(&self, frame: &RgbImage) -> Option<StickerGrid> {
        self.detect_frame_with_telemetry(frame).0
    }

    /// Like [`Detector::detect_frame`] but also returns stage counters
    pub fn detect_frame_with_telemetry(
        &self,
        frame: &RgbImage,
    ) -> (Option<StickerGrid>, DetectionTelemetry) {
        let mask = to_edge_mask(frame, &self.config.preprocess);
        self.detect_mask_with_telemetry(&mask)
    }

    /// Detect a cube face in a grayscale frame
    pub fn detect_gray(&self, gray: &GrayImage) -> Option<StickerGrid> {
        let mask = gray_to_edge_mask(gray, &self.config.preprocess);
        self.detect_mask_with_telemetry(&mask).0
    }

    /// Detect a cube face from a binary edge mask produced elsewhere
    pub fn detect_mask_with_telemetry(
        &self,
        mask: &GrayImage,
    ) -> (Option<StickerGrid>, DetectionTelemetry) {
        let polygons = extract_polygons(mask);
        let (grid, telemetry) = self.detect_polygons_with_telemetry(&polygons);
        log::debug!(
            "detect: {}x{} mask, {:?}",
            mask.width(),
            mask.height(),
            telemetry
        );
        (grid, telemetry)
    }

    /// Detect independently in each frame, in parallel
    pub fn detect_batch(&self, frames: &[RgbImage]) -> Vec<Option<StickerGrid>> {
        frames
            .par_iter()
            .map(|frame| self.detect_frame(frame))
            .collect()
    }
}
