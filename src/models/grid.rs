use super::bounding_box::BoundingBox;
use serde::Serialize;

/// Stickers per row and per column of a cube face
pub const GRID_SIZE: usize = 3;
/// Stickers on one cube face
pub const STICKER_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// The nine sticker boxes of one cube face in row-major order
/// (top row left to right, then middle row, then bottom row).
///
/// Grids are only built by the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StickerGrid {
    stickers: [BoundingBox; STICKER_COUNT],
}

impl StickerGrid {
    /// Wrap boxes that are already in row-major order
    pub(crate) fn from_row_major(stickers: [BoundingBox; STICKER_COUNT]) -> Self {
        Self { stickers }
    }

    /// All nine boxes in row-major order
    pub fn stickers(&self) -> &[BoundingBox; STICKER_COUNT] {
        &self.stickers
    }

    /// Sticker at `(row, col)`, both zero-based
    pub fn get(&self, row: usize, col: usize) -> Option<&BoundingBox> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        self.stickers.get(row * GRID_SIZE + col)
    }

    /// Iterate over the three rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[BoundingBox]> {
        self.stickers.chunks(GRID_SIZE)
    }

    /// The middle sticker of the face
    pub fn center(&self) -> &BoundingBox {
        &self.stickers[STICKER_COUNT / 2]
    }

    /// Box enclosing the whole face
    pub fn bounds(&self) -> BoundingBox {
        self.stickers[1..]
            .iter()
            .fold(self.stickers[0], |acc, b| acc.union(b))
    }

    /// Iterate over the stickers in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.stickers.iter()
    }
}

impl<'a> IntoIterator for &'a StickerGrid {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice() -> StickerGrid {
        let mut boxes = [BoundingBox::default(); STICKER_COUNT];
        for (i, b) in boxes.iter_mut().enumerate() {
            let (row, col) = ((i / GRID_SIZE) as i32, (i % GRID_SIZE) as i32);
            *b = BoundingBox::new(col * 50, row * 50, 40, 40);
        }
        StickerGrid::from_row_major(boxes)
    }

    #[test]
    fn test_accessors() {
        let grid = lattice();
        assert_eq!(grid.get(0, 0), Some(&BoundingBox::new(0, 0, 40, 40)));
        assert_eq!(grid.get(2, 1), Some(&BoundingBox::new(50, 100, 40, 40)));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.center(), &BoundingBox::new(50, 50, 40, 40));
        assert_eq!(grid.rows().count(), 3);
        assert_eq!(grid.bounds(), BoundingBox::new(0, 0, 140, 140));
        assert_eq!(grid.iter().count(), STICKER_COUNT);
    }

    #[test]
    fn test_serializes_row_major() {
        let json = serde_json::to_value(lattice()).expect("serialize");
        let stickers = json["stickers"].as_array().expect("stickers array");
        assert_eq!(stickers.len(), STICKER_COUNT);
        assert_eq!(stickers[0]["x"], 0);
        assert_eq!(stickers[2]["x"], 100);
        assert_eq!(stickers[3]["y"], 50);
    }
}
