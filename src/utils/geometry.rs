/// Geometry utilities for contour measurement and polygon simplification
use crate::models::{Point, PointI};

/// Total length of a polyline, including the closing segment when `closed`
/// and the polyline has at least three vertices
pub fn arc_length(points: &[PointI], closed: bool) -> f32 {
    let arc: Vec<imageproc::point::Point<i32>> = points
        .iter()
        .map(|p| imageproc::point::Point::new(p.x, p.y))
        .collect();
    imageproc::geometry::arc_length(&arc, closed) as f32
}

/// Unsigned area enclosed by a closed contour (shoelace formula)
pub fn contour_area(points: &[PointI]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }

    twice_area.abs() as f32 / 2.0
}

/// Douglas-Peucker polyline simplification.
///
/// Vertices closer than `epsilon` to the simplified outline are dropped. A
/// closed contour is first split at two mutually distant vertices, so the
/// result does not depend on where the contour trace happened to start.
pub fn approximate_polygon_dp(points: &[PointI], epsilon: f32, closed: bool) -> Vec<PointI> {
    if points.len() < 3 {
        return points.to_vec();
    }
    if !closed {
        return simplify_open(points, epsilon);
    }

    let a = farthest_from(points, points[0]);
    let b = farthest_from(points, points[a]);
    let (start, end) = (a.min(b), a.max(b));
    if start == end {
        // Every vertex coincides
        return vec![points[start]];
    }

    let mut simplified = simplify_open(&points[start..=end], epsilon);
    let wrapped: Vec<PointI> = points[end..]
        .iter()
        .chain(points[..=start].iter())
        .copied()
        .collect();
    let back = simplify_open(&wrapped, epsilon);
    // `back` starts at points[end] and ends at points[start]; both are already kept
    if back.len() > 2 {
        simplified.extend_from_slice(&back[1..back.len() - 1]);
    }
    simplified
}

fn farthest_from(points: &[PointI], origin: PointI) -> usize {
    let origin = origin.to_f32();
    let mut best_idx = 0usize;
    let mut best_dist = 0.0f32;
    for (i, p) in points.iter().enumerate() {
        let d = origin.distance(&p.to_f32());
        if d > best_dist {
            best_dist = d;
            best_idx = i;
        }
    }
    best_idx
}

fn simplify_open(points: &[PointI], epsilon: f32) -> Vec<PointI> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }

        let a = points[first].to_f32();
        let b = points[last].to_f32();
        let mut max_dist = -1.0f32;
        let mut max_idx = first;
        for (i, p) in points.iter().enumerate().take(last).skip(first + 1) {
            let d = perpendicular_distance(&p.to_f32(), &a, &b);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > epsilon {
            keep[max_idx] = true;
            stack.push((first, max_idx));
            stack.push((max_idx, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Distance from `p` to the line through `a` and `b` (or to `a` when they coincide)
fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-6 {
        return p.distance(a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}
