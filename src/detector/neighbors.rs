use crate::config::GridConfig;
use crate::models::{BoundingBox, Point, STICKER_COUNT};

/// Unit offsets of the nine neighbor slots, top-left to bottom-right
const SLOT_OFFSETS: [(f32, f32); STICKER_COUNT] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (0.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Points where the centers of a box's eight grid neighbors (and its own
/// center) should fall if the box is the middle sticker of a face.
pub fn neighbor_slots(bbox: &BoundingBox, radius: f32) -> [Point; STICKER_COUNT] {
    let center = bbox.center();
    let step_x = bbox.w as f32 * radius;
    let step_y = bbox.h as f32 * radius;
    SLOT_OFFSETS.map(|(dx, dy)| center.translate(dx * step_x, dy * step_y))
}

/// For each candidate, the indices of candidates covering its neighbor slots.
///
/// Without deduplication a candidate is listed once per slot it covers, so an
/// oversized box straddling two slots counts twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborMap {
    neighbors: Vec<Vec<usize>>,
}

impl NeighborMap {
    /// Run the pairwise slot test over all candidates (O(n^2))
    pub fn build(candidates: &[BoundingBox], config: &GridConfig) -> Self {
        let neighbors = candidates
            .iter()
            .map(|candidate| {
                let slots = neighbor_slots(candidate, config.radius);
                let mut matched = Vec::new();
                for (j, other) in candidates.iter().enumerate() {
                    let hits = slots.iter().filter(|s| other.strictly_contains(s)).count();
                    let hits = if config.dedup_neighbors { hits.min(1) } else { hits };
                    matched.extend(std::iter::repeat_n(j, hits));
                }
                matched
            })
            .collect();

        Self { neighbors }
    }

    /// Matched candidate indices for candidate `index`
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of candidates in the map
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// True when built from no candidates
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// First candidate, in input order, with exactly nine matches
    pub fn first_complete(&self) -> Option<usize> {
        self.neighbors.iter().position(|n| n.len() == STICKER_COUNT)
    }

    /// Largest match count of any candidate
    pub fn best_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).max().unwrap_or(0)
    }
}
