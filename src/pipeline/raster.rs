use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::geometry::triangle::Triangle;
use crate::geometry::vec3::Vec3;
use crate::render::surface::DrawSurface;

/// Stroke parameters for mesh rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterStyle {
    /// Wireframe color, and fill color for unlit meshes.
    pub color: Color,
    /// Stroke alpha.
    pub alpha: f64,
    /// Stroke width in pixels.
    pub width: f64,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            alpha: 1.0,
            width: 2.0,
        }
    }
}

impl RasterStyle {
    /// Replace the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replace the alpha.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Replace the stroke width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

fn xy(v: Vec3) -> Point {
    Point::new(v.x, v.y)
}

fn segment(surface: &mut dyn DrawSurface, a: Point, b: Point, style: &RasterStyle) {
    surface.move_to(a);
    surface.line_to(b);
    surface.stroke(style.color, style.alpha, style.width);
}

/// Stroke edges 1-2, 2-3 and 3-1.
pub(crate) fn wireframe(surface: &mut dyn DrawSurface, tri: &Triangle, style: &RasterStyle) -> usize {
    let [p1, p2, p3] = tri.0;
    segment(surface, xy(p1), xy(p2), style);
    segment(surface, xy(p2), xy(p3), style);
    segment(surface, xy(p3), xy(p1), style);
    3
}

/// Long edge endpoints and the opposite apex, picking the longest screen edge.
///
/// Edges are compared in the order 1-2, 2-3, 3-1 and a later edge wins a tie.
pub(crate) fn long_edge(tri: &Triangle) -> (Vec3, Vec3, Vec3) {
    let [p1, p2, p3] = tri.0;
    let candidates = [(p1, p2, p3), (p2, p3, p1), (p3, p1, p2)];
    let lens = tri.edge_lengths();
    let mut best = 0;
    for k in 1..3 {
        if lens[k] >= lens[best] {
            best = k;
        }
    }
    candidates[best]
}

/// Fill a triangle with lines from points along its longest edge to the apex.
///
/// The sweep runs over integer steps of whichever axis the long edge spans more; the
/// bounds truncate toward zero. A zero-length long edge emits nothing.
pub(crate) fn sweep_fill(surface: &mut dyn DrawSurface, tri: &Triangle, style: &RasterStyle) -> usize {
    let (a, b, apex) = long_edge(tri);
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    if dx == 0.0 && dy == 0.0 {
        return 0;
    }
    let apex = xy(apex);

    let mut strokes = 0;
    if dx.abs() > dy.abs() {
        let m = dy / dx;
        let lo = a.x.min(b.x).trunc() as i64;
        let hi = (a.x.max(b.x) + 1.0).trunc() as i64;
        for x in lo..hi {
            let x = x as f64;
            let y = m * (x - b.x) + b.y;
            segment(surface, Point::new(x, y), apex, style);
            strokes += 1;
        }
    } else {
        let m = dx / dy;
        let lo = a.y.min(b.y).trunc() as i64;
        let hi = (a.y.max(b.y) + 1.0).trunc() as i64;
        for y in lo..hi {
            let y = y as f64;
            let x = m * (y - b.y) + b.x;
            segment(surface, Point::new(x, y), apex, style);
            strokes += 1;
        }
    }
    strokes
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/raster.rs"]
mod tests;
