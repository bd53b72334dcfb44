//! Detector configuration
//!
//! Every constant that depends on camera resolution or viewing distance lives
//! here with its default. Configs load from JSON (missing fields fall back to
//! the defaults) and can be overridden from `CUBE_*` environment variables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Shape gates applied to each simplified contour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareFilterConfig {
    /// Douglas-Peucker tolerance as a fraction of the contour perimeter
    pub epsilon_factor: f32,
    /// Smallest accepted `w / h`
    pub min_ratio: f32,
    /// Largest accepted `w / h`
    pub max_ratio: f32,
    /// Smallest accepted box width in pixels
    pub min_width: i32,
    /// Largest accepted box width in pixels
    pub max_width: i32,
    /// Contour area over box area must exceed this
    pub min_fill: f32,
}

impl Default for SquareFilterConfig {
    fn default() -> Self {
        Self {
            epsilon_factor: 0.1,
            min_ratio: 0.8,
            max_ratio: 1.2,
            min_width: 30,
            max_width: 60,
            min_fill: 0.4,
        }
    }
}

/// Neighbor-slot geometry for the grid locator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Slot spread in multiples of the box size
    pub radius: f32,
    /// Count a candidate at most once per center even if it covers several slots
    pub dedup_neighbors: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            dedup_neighbors: false,
        }
    }
}

/// Edge-mask preprocessing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Box blur radius (1 gives a 3x3 kernel)
    pub blur_radius: u32,
    /// Canny hysteresis low threshold
    pub canny_low: f32,
    /// Canny hysteresis high threshold
    pub canny_high: f32,
    /// Dilation radius under the L-infinity norm (4 gives a 9x9 square)
    pub dilate_radius: u8,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_radius: 1,
            canny_low: 30.0,
            canny_high: 60.0,
            dilate_radius: 4,
        }
    }
}

/// Full detector configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Square filter gates
    pub square: SquareFilterConfig,
    /// Grid locator geometry
    pub grid: GridConfig,
    /// Edge-mask preprocessing
    pub preprocess: PreprocessConfig,
}

impl DetectorConfig {
    /// Load a JSON config file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DetectorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CUBE_*` environment overrides on top of this config
    pub fn with_env_overrides(mut self) -> Result<Self> {
        let sq = &mut self.square;
        sq.epsilon_factor = parse_env_f32("CUBE_EPSILON_FACTOR", sq.epsilon_factor);
        sq.min_ratio = parse_env_f32("CUBE_MIN_RATIO", sq.min_ratio);
        sq.max_ratio = parse_env_f32("CUBE_MAX_RATIO", sq.max_ratio);
        sq.min_width = parse_env_i32("CUBE_MIN_WIDTH", sq.min_width);
        sq.max_width = parse_env_i32("CUBE_MAX_WIDTH", sq.max_width);
        sq.min_fill = parse_env_f32("CUBE_MIN_FILL", sq.min_fill);

        self.grid.radius = parse_env_f32("CUBE_GRID_RADIUS", self.grid.radius);
        self.grid.dedup_neighbors =
            parse_env_bool_u8("CUBE_DEDUP_NEIGHBORS", self.grid.dedup_neighbors);

        let pre = &mut self.preprocess;
        pre.canny_low = parse_env_f32("CUBE_CANNY_LOW", pre.canny_low);
        pre.canny_high = parse_env_f32("CUBE_CANNY_HIGH", pre.canny_high);

        self.validate()?;
        Ok(self)
    }

    /// Reject configurations under which nothing could ever be detected
    pub fn validate(&self) -> Result<()> {
        let sq = &self.square;
        if !(sq.epsilon_factor > 0.0) {
            return Err(invalid("square.epsilon_factor must be positive"));
        }
        if sq.min_ratio > sq.max_ratio {
            return Err(invalid("square.min_ratio exceeds square.max_ratio"));
        }
        if sq.min_width > sq.max_width {
            return Err(invalid("square.min_width exceeds square.max_width"));
        }
        if !(self.grid.radius > 0.0) {
            return Err(invalid("grid.radius must be positive"));
        }
        let pre = &self.preprocess;
        if pre.canny_low > pre.canny_high {
            return Err(invalid("preprocess.canny_low exceeds preprocess.canny_high"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidConfig(message.to_string())
}

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .unwrap_or(default)
}

fn parse_env_i32(name: &str, default: i32) -> i32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}
