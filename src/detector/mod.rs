//! Cube face detection modules
//!
//! This module contains the two pure stages of detection:
//! - Square filtering (keep contours shaped like stickers)
//! - Grid location (find nine candidates arranged 3x3 and order them)

/// Row-major 3x3 grid location
pub mod grid;
/// Neighbor-slot matching between candidates
pub mod neighbors;
/// Sticker-shaped contour filtering
pub mod square;

pub use grid::{GridSearch, locate_grid, order_row_major, search_grid};
pub use neighbors::{NeighborMap, neighbor_slots};
pub use square::{SquareFilterStats, filter_squares, filter_squares_with_stats};
