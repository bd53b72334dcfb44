//! Errors raised at the I/O boundary (config files, frames, reports).
//!
//! Detection itself never fails: a frame without a cube face simply yields no grid.

use thiserror::Error;

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Frame could not be decoded or encoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// Config or report JSON could not be parsed or written
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    /// Config parsed but violates an invariant
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;
