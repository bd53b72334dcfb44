/// Contour extraction from a binary edge mask
/// Every outer border and hole border is traced, then straight runs are
/// collapsed to their endpoints before the area is measured.
use crate::models::{PointI, PolygonCandidate};
use image::GrayImage;
use imageproc::contours::find_contours;

/// Trace all borders of the non-zero regions in `mask`
pub fn extract_polygons(mask: &GrayImage) -> Vec<PolygonCandidate> {
    if mask.width() == 0 || mask.height() == 0 {
        return Vec::new();
    }
    find_contours::<i32>(mask)
        .into_iter()
        .map(|contour| {
            let points: Vec<PointI> = contour
                .points
                .iter()
                .map(|p| PointI::new(p.x, p.y))
                .collect();
            PolygonCandidate::from_points(compress_chain(&points))
        })
        .collect()
}

/// Drop every vertex that continues the step direction of its predecessor.
///
/// Horizontal, vertical and diagonal runs shrink to their two endpoints; the
/// enclosed area is unchanged.
pub fn compress_chain(points: &[PointI]) -> Vec<PointI> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |a: PointI, b: PointI| (b.x - a.x, b.y - a.y);
    let compressed: Vec<PointI> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if compressed.is_empty() {
        points.to_vec()
    } else {
        compressed
    }
}
