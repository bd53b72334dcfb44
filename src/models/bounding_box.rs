use super::point::{Point, PointI};
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle: top-left corner plus width/height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl BoundingBox {
    /// Create a box from its top-left corner and size
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest box covering every point, counting pixels inclusively
    /// (a single pixel has size 1x1).
    pub fn from_points(points: &[PointI]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Geometric center `(x + w/2, y + h/2)`
    pub fn center(&self) -> Point {
        Point::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Box area in pixels
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Width over height; `None` for a degenerate height
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.h <= 0 {
            return None;
        }
        Some(self.w as f32 / self.h as f32)
    }

    /// Open-interval containment: points on the border are outside.
    pub fn strictly_contains(&self, p: &Point) -> bool {
        let (left, top) = (self.x as f32, self.y as f32);
        let (right, bottom) = (left + self.w as f32, top + self.h as f32);
        left < p.x && p.x < right && top < p.y && p.y < bottom
    }

    /// Smallest box covering both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.w).max(other.x + other.w);
        let bottom = (self.y + self.h).max(other.y + other.h);
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}
