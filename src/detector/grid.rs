use super::neighbors::NeighborMap;
use crate::config::GridConfig;
use crate::models::{BoundingBox, GRID_SIZE, STICKER_COUNT, StickerGrid};

/// Outcome of one locator run, with the counters behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSearch {
    /// The located face, if any
    pub grid: Option<StickerGrid>,
    /// Index of the candidate accepted as the face center
    pub center_index: Option<usize>,
    /// Highest neighbor count reached by any candidate
    pub best_neighbor_count: usize,
}

/// Find nine candidates forming a 3x3 grid and return them row-major.
///
/// The first candidate (in input order) whose neighbor slots are covered
/// exactly nine times is taken as the face center, and the candidates that
/// covered its slots become the grid. Partial grids are never salvaged.
pub fn locate_grid(all_candidates: &[BoundingBox], config: &GridConfig) -> Option<StickerGrid> {
    search_grid(all_candidates, config).grid
}

/// Like [`locate_grid`] but also reports which candidate was the center.
pub fn search_grid(all_candidates: &[BoundingBox], config: &GridConfig) -> GridSearch {
    if all_candidates.len() < STICKER_COUNT {
        return GridSearch {
            grid: None,
            center_index: None,
            best_neighbor_count: 0,
        };
    }

    let neighbor_map = NeighborMap::build(all_candidates, config);
    let best_neighbor_count = neighbor_map.best_count();
    let center_index = neighbor_map.first_complete();

    let grid = center_index.and_then(|center| {
        let selected_grid: Vec<BoundingBox> = neighbor_map
            .neighbors(center)
            .iter()
            .map(|&j| all_candidates[j])
            .collect();
        let selected_grid: [BoundingBox; STICKER_COUNT] = selected_grid.try_into().ok()?;
        Some(order_row_major(selected_grid))
    });

    log::debug!(
        "grid locator: {} candidates, best neighbor count {}, center {:?}",
        all_candidates.len(),
        best_neighbor_count,
        center_index
    );

    GridSearch {
        grid,
        center_index,
        best_neighbor_count,
    }
}

/// Sort by top edge, cut into rows of three, then sort each row by left edge.
///
/// Both sorts are stable, so boxes sharing an edge keep their relative order.
pub fn order_row_major(mut stickers: [BoundingBox; STICKER_COUNT]) -> StickerGrid {
    stickers.sort_by_key(|b| b.y);
    for row in stickers.chunks_mut(GRID_SIZE) {
        row.sort_by_key(|b| b.x);
    }
    StickerGrid::from_row_major(stickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice(x0: i32, y0: i32, spacing: i32, size: i32) -> Vec<BoundingBox> {
        let mut boxes = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                boxes.push(BoundingBox::new(x0 + spacing * i, y0 + spacing * j, size, size));
            }
        }
        boxes
    }

    #[test]
    fn test_too_few_candidates() {
        let boxes = lattice(0, 0, 50, 40);
        let search = search_grid(&boxes[..8], &GridConfig::default());
        assert_eq!(search.grid, None);
        assert_eq!(search.best_neighbor_count, 0);
    }

    #[test]
    fn test_finds_center_of_lattice() {
        let boxes = lattice(0, 0, 50, 40);
        let search = search_grid(&boxes, &GridConfig::default());
        assert_eq!(search.center_index, Some(4));
        assert_eq!(search.best_neighbor_count, 9);
        let grid = search.grid.expect("grid");
        assert_eq!(grid.stickers().as_slice(), boxes.as_slice());
    }

    #[test]
    fn test_order_row_major() {
        let boxes = lattice(10, 20, 50, 40);
        let mut shuffled: [BoundingBox; STICKER_COUNT] = boxes.clone().try_into().expect("nine");
        shuffled.reverse();
        shuffled.swap(1, 7);
        let grid = order_row_major(shuffled);
        assert_eq!(grid.stickers().as_slice(), boxes.as_slice());
    }

    #[test]
    fn test_rows_tolerate_uneven_top_edges() {
        // A slightly tilted face: rows are still separated by y
        let mut boxes = lattice(0, 0, 50, 40);
        boxes[2].y += 4;
        boxes[3].y -= 3;
        let arr: [BoundingBox; STICKER_COUNT] = boxes.clone().try_into().expect("nine");
        let grid = order_row_major(arr);
        assert_eq!(grid.get(0, 2), Some(&boxes[2]));
        assert_eq!(grid.get(1, 0), Some(&boxes[3]));
    }

    #[test]
    fn test_partial_grid_not_salvaged() {
        let mut boxes = lattice(0, 0, 50, 40);
        // Remove the bottom-right sticker and pad with a far-away box
        boxes[8] = BoundingBox::new(900, 900, 40, 40);
        let search = search_grid(&boxes, &GridConfig::default());
        assert_eq!(search.grid, None);
        assert_eq!(search.best_neighbor_count, 8);
    }

    #[test]
    fn test_intruding_box_spoils_count() {
        let mut boxes = lattice(0, 0, 50, 40);
        // An extra box overlapping the top-right slot pushes the center to ten
        boxes.push(BoundingBox::new(115, 0, 30, 30));
        let search = search_grid(&boxes, &GridConfig::default());
        assert_eq!(search.grid, None);
        assert_eq!(search.best_neighbor_count, 10);
    }

    #[test]
    fn test_stray_box_outside_slots_is_ignored() {
        let mut boxes = lattice(0, 0, 50, 40);
        boxes.insert(0, BoundingBox::new(400, 300, 40, 40));
        let grid = locate_grid(&boxes, &GridConfig::default()).expect("grid");
        assert_eq!(grid.stickers().as_slice(), &boxes[1..]);
    }
}
