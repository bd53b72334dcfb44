//! Utility functions for image processing
//!
//! This module provides the helpers that turn a color frame into sticker
//! candidates:
//! - Grayscale conversion (RGB to luminance, row-parallel on large frames)
//! - Edge-mask preprocessing (blur, Canny, dilation)
//! - Contour tracing and chain compression
//! - Geometry (perimeter, area, polygon simplification)

pub mod contours;
pub mod geometry;
pub mod grayscale;
pub mod preprocess;
