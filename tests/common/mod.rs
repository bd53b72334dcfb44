//! Synthetic frames and box layouts shared by the integration tests.
#![allow(dead_code)]

use cube_grid::BoundingBox;
use image::{Rgb, RgbImage};

/// Bright sticker colors; all well above the dark cube body in luminance
pub const PALETTE: [Rgb<u8>; 6] = [
    Rgb([255, 255, 255]),
    Rgb([255, 213, 0]),
    Rgb([255, 140, 60]),
    Rgb([120, 230, 120]),
    Rgb([140, 200, 255]),
    Rgb([255, 150, 170]),
];

/// Nine boxes with top-left corners `(x0 + spacing*i, y0 + spacing*j)`, row-major
pub fn lattice(x0: i32, y0: i32, spacing: i32, size: i32) -> Vec<BoundingBox> {
    let mut boxes = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            boxes.push(BoundingBox::new(x0 + spacing * i, y0 + spacing * j, size, size));
        }
    }
    boxes
}

/// Deterministic shuffle (xorshift) so failures reproduce
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    let mut state = seed.max(1);
    for i in (1..out.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let j = (state % (i as u64 + 1)) as usize;
        out.swap(i, j);
    }
    out
}

/// Dark 640x480 frame with a filled rectangle for every sticker
pub fn render_face(stickers: &[BoundingBox]) -> RgbImage {
    let mut frame = RgbImage::from_pixel(640, 480, Rgb([10, 10, 10]));
    for (k, sticker) in stickers.iter().enumerate() {
        let color = PALETTE[k % PALETTE.len()];
        for y in sticker.y..sticker.y + sticker.h {
            for x in sticker.x..sticker.x + sticker.w {
                if x >= 0 && y >= 0 && (x as u32) < frame.width() && (y as u32) < frame.height() {
                    frame.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
    frame
}
