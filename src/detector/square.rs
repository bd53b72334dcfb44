use crate::config::SquareFilterConfig;
use crate::models::{BoundingBox, PointI, PolygonCandidate};
use crate::utils::geometry::{approximate_polygon_dp, arc_length};

/// Counters gathered while filtering one frame's contours
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareFilterStats {
    /// Contours examined
    pub contours: usize,
    /// Contours that simplified to exactly four vertices
    pub quadrilaterals: usize,
    /// Quadrilaterals that passed the shape gates
    pub accepted: usize,
}

/// Keep the bounding boxes of contours that look like cube stickers.
///
/// Output order follows input order. Anything malformed is dropped silently.
pub fn filter_squares(polygons: &[PolygonCandidate], config: &SquareFilterConfig) -> Vec<BoundingBox> {
    filter_squares_with_stats(polygons, config).0
}

/// Like [`filter_squares`] but also reports per-gate counters.
pub fn filter_squares_with_stats(
    polygons: &[PolygonCandidate],
    config: &SquareFilterConfig,
) -> (Vec<BoundingBox>, SquareFilterStats) {
    let mut stats = SquareFilterStats {
        contours: polygons.len(),
        ..Default::default()
    };
    let mut squares = Vec::new();

    for polygon in polygons {
        let Some(quad) = approximate_quad(&polygon.points, config.epsilon_factor) else {
            continue;
        };
        stats.quadrilaterals += 1;

        let Some(bbox) = BoundingBox::from_points(&quad) else {
            continue;
        };
        if is_sticker_shaped(&bbox, polygon.area, config) {
            squares.push(bbox);
        }
    }

    stats.accepted = squares.len();
    log::trace!(
        "square filter: {} contours, {} quads, {} accepted",
        stats.contours,
        stats.quadrilaterals,
        stats.accepted
    );
    (squares, stats)
}

/// Simplify a closed contour and return it only if four vertices remain
pub fn approximate_quad(points: &[PointI], epsilon_factor: f32) -> Option<Vec<PointI>> {
    let epsilon = epsilon_factor * arc_length(points, true);
    let approx = approximate_polygon_dp(points, epsilon, true);
    (approx.len() == 4).then_some(approx)
}

/// Aspect ratio, width window and fill ratio gates.
///
/// `area` is the area of the original contour, not of the quadrilateral.
pub fn is_sticker_shaped(bbox: &BoundingBox, area: f32, config: &SquareFilterConfig) -> bool {
    let Some(ratio) = bbox.aspect_ratio() else {
        return false;
    };
    if !(config.min_ratio..=config.max_ratio).contains(&ratio) {
        return false;
    }
    if !(config.min_width..=config.max_width).contains(&bbox.w) {
        return false;
    }

    let box_area = bbox.area();
    box_area > 0 && area / box_area as f32 > config.min_fill
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SquareFilterConfig {
        SquareFilterConfig::default()
    }

    #[test]
    fn test_accepts_solid_square() {
        let polys = [PolygonCandidate::rectangle(10, 10, 40, 40)];
        assert_eq!(filter_squares(&polys, &config()), vec![BoundingBox::new(10, 10, 40, 40)]);
    }

    #[test]
    fn test_rejects_elongated_box() {
        let poly = PolygonCandidate::rectangle(0, 0, 50, 20);
        assert!(filter_squares(&[poly], &config()).is_empty());
        // Even a perfect fill ratio cannot rescue the aspect ratio
        let bbox = BoundingBox::new(0, 0, 50, 20);
        assert!(!is_sticker_shaped(&bbox, 1000.0, &config()));
    }

    #[test]
    fn test_rejects_small_square() {
        let poly = PolygonCandidate::rectangle(0, 0, 20, 20);
        assert!(filter_squares(&[poly], &config()).is_empty());
    }

    #[test]
    fn test_rejects_large_square() {
        let poly = PolygonCandidate::rectangle(0, 0, 61, 61);
        assert!(filter_squares(&[poly], &config()).is_empty());
    }

    #[test]
    fn test_width_window_is_inclusive() {
        let polys = [
            PolygonCandidate::rectangle(0, 0, 30, 30),
            PolygonCandidate::rectangle(100, 0, 60, 60),
        ];
        assert_eq!(filter_squares(&polys, &config()).len(), 2);
    }

    #[test]
    fn test_rejects_low_fill_ratio() {
        let outline = PolygonCandidate::rectangle(0, 0, 45, 50);
        let hollow = PolygonCandidate::new(outline.points, 0.2 * 45.0 * 50.0);
        assert!(filter_squares(&[hollow], &config()).is_empty());
    }

    #[test]
    fn test_rejects_non_quadrilateral() {
        let triangle = PolygonCandidate::from_points(vec![
            PointI::new(0, 0),
            PointI::new(40, 0),
            PointI::new(20, 40),
        ]);
        let (squares, stats) = filter_squares_with_stats(&[triangle], &config());
        assert!(squares.is_empty());
        assert_eq!(stats.quadrilaterals, 0);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let polys = [
            PolygonCandidate::default(),
            PolygonCandidate::new(vec![PointI::new(5, 5)], 0.0),
            PolygonCandidate::new(vec![PointI::new(0, 0), PointI::new(40, 0)], 0.0),
        ];
        assert!(filter_squares(&polys, &config()).is_empty());
    }

    #[test]
    fn test_stats_count_each_gate() {
        let polys = [
            PolygonCandidate::rectangle(0, 0, 40, 40),
            PolygonCandidate::rectangle(100, 0, 50, 20),
            PolygonCandidate::from_points(vec![
                PointI::new(0, 0),
                PointI::new(40, 0),
                PointI::new(20, 40),
            ]),
        ];
        let (squares, stats) = filter_squares_with_stats(&polys, &config());
        assert_eq!(squares.len(), 1);
        assert_eq!(
            stats,
            SquareFilterStats {
                contours: 3,
                quadrilaterals: 2,
                accepted: 1
            }
        );
    }
}
