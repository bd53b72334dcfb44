use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cube_grid::{
    BoundingBox, GridConfig, PolygonCandidate, SquareFilterConfig, filter_squares, locate_grid,
};

/// A face lattice plus scattered clutter, roughly what a busy frame yields
fn candidates(clutter: i32) -> Vec<BoundingBox> {
    let mut boxes = Vec::new();
    for k in 0..clutter {
        boxes.push(BoundingBox::new((k * 97) % 600, (k * 53) % 440, 35, 38));
    }
    for j in 0..3 {
        for i in 0..3 {
            boxes.push(BoundingBox::new(250 + 50 * i, 170 + 50 * j, 40, 40));
        }
    }
    boxes
}

fn bench_locate_grid_face_only(c: &mut Criterion) {
    let boxes = candidates(0);
    let config = GridConfig::default();
    c.bench_function("locate_grid_9", |b| {
        b.iter(|| locate_grid(black_box(&boxes), black_box(&config)))
    });
}

fn bench_locate_grid_cluttered(c: &mut Criterion) {
    let boxes = candidates(60);
    let config = GridConfig::default();
    c.bench_function("locate_grid_69", |b| {
        b.iter(|| locate_grid(black_box(&boxes), black_box(&config)))
    });
}

fn bench_filter_squares(c: &mut Criterion) {
    let polygons: Vec<PolygonCandidate> = candidates(60)
        .iter()
        .map(|b| PolygonCandidate::rectangle(b.x, b.y, b.w, b.h))
        .collect();
    let config = SquareFilterConfig::default();
    c.bench_function("filter_squares_69", |b| {
        b.iter(|| filter_squares(black_box(&polygons), black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_locate_grid_face_only,
    bench_locate_grid_cluttered,
    bench_filter_squares
);
criterion_main!(benches);
