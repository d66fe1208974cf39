use super::*;
use crate::render::surface::{DrawCommand, RecordingSurface};

fn starts(surface: &RecordingSurface) -> Vec<Point> {
    surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::MoveTo(p) => Some(*p),
            _ => None,
        })
        .collect()
}

#[test]
fn longest_edge_wins() {
    let tri = Triangle::new([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
    let (a, b, apex) = long_edge(&tri);
    assert_eq!((a, b, apex), (tri.0[1], tri.0[2], tri.0[0]));
}

#[test]
fn tied_edges_resolve_to_the_later_one() {
    let tri = Triangle::new([0.0, 0.0, 0.0], [4.0, 1.0, 0.0], [4.0, -1.0, 0.0]);
    let lens = tri.edge_lengths();
    assert_eq!(lens[0], lens[2]);
    let (a, b, apex) = long_edge(&tri);
    assert_eq!((a, b, apex), (tri.0[2], tri.0[0], tri.0[1]));
}

#[test]
fn horizontal_sweep_hits_every_integer_column() {
    let tri = Triangle::new([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [5.0, 3.0, 0.0]);
    let mut surface = RecordingSurface::new();
    let n = sweep_fill(&mut surface, &tri, &RasterStyle::default());
    assert_eq!(n, 11);
    assert_eq!(surface.stroke_count(), 11);
    let xs: Vec<f64> = starts(&surface).iter().map(|p| p.x).collect();
    assert_eq!(xs, (0..11).map(f64::from).collect::<Vec<_>>());
    assert!(surface.commands().iter().all(|c| match c {
        DrawCommand::LineTo(p) => *p == Point::new(5.0, 3.0),
        _ => true,
    }));
}

#[test]
fn vertical_sweep_when_edge_is_taller() {
    let tri = Triangle::new([0.0, 0.0, 0.0], [0.0, 10.0, 0.0], [3.0, 5.0, 0.0]);
    let mut surface = RecordingSurface::new();
    assert_eq!(sweep_fill(&mut surface, &tri, &RasterStyle::default()), 11);
    let pts = starts(&surface);
    assert_eq!(pts[0].y, 0.0);
    assert_eq!(pts[10].y, 10.0);
    assert!(pts.iter().all(|p| p.x == 0.0));
}

#[test]
fn sweep_bounds_truncate_toward_zero() {
    let tri = Triangle::new([-2.5, 0.0, 0.0], [3.5, 0.0, 0.0], [0.0, 1.0, 0.0]);
    let mut surface = RecordingSurface::new();
    assert_eq!(sweep_fill(&mut surface, &tri, &RasterStyle::default()), 6);
    assert_eq!(starts(&surface)[0].x, -2.0);
}

#[test]
fn degenerate_triangle_emits_nothing() {
    let tri = Triangle::new([1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 0.0]);
    let mut surface = RecordingSurface::new();
    assert_eq!(sweep_fill(&mut surface, &tri, &RasterStyle::default()), 0);
    assert!(surface.commands().is_empty());
}

#[test]
fn style_builders_replace_fields() {
    let style = RasterStyle::default()
        .with_color(Color::WHITE)
        .with_alpha(0.5)
        .with_width(4.0);
    assert_eq!(style.color, Color::WHITE);
    assert_eq!(style.alpha, 0.5);
    assert_eq!(style.width, 4.0);
}
