use super::point::PointI;
use crate::utils::geometry::contour_area;

/// A closed contour as extracted from an edge mask, together with its raw area.
///
/// The area travels separately from the points because the square filter
/// compares the area of the *original* contour against the bounding box of
/// its simplified quadrilateral.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonCandidate {
    /// Contour vertices in traversal order
    pub points: Vec<PointI>,
    /// Enclosed area in square pixels
    pub area: f32,
}

impl PolygonCandidate {
    /// Pair a contour with an explicitly supplied area
    pub fn new(points: Vec<PointI>, area: f32) -> Self {
        Self { points, area }
    }

    /// Build a candidate whose area is the shoelace area of its points
    pub fn from_points(points: Vec<PointI>) -> Self {
        let area = contour_area(&points);
        Self { points, area }
    }

    /// Axis-aligned rectangle outline with the given top-left corner and pixel size
    pub fn rectangle(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::from_points(vec![
            PointI::new(x, y),
            PointI::new(x + w - 1, y),
            PointI::new(x + w - 1, y + h - 1),
            PointI::new(x, y + h - 1),
        ])
    }
}
