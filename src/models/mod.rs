pub mod bounding_box;
pub mod grid;
pub mod point;
pub mod polygon;

pub use bounding_box::BoundingBox;
pub use grid::{GRID_SIZE, STICKER_COUNT, StickerGrid};
pub use point::{Point, PointI};
pub use polygon::PolygonCandidate;
