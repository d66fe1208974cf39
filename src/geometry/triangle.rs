//! Triangles in model, camera or screen space.

use serde::{Deserialize, Serialize};

use crate::geometry::vec3::Vec3;

/// Three vertices in a fixed winding order.
///
/// Winding decides the sign of [`Triangle::normal`]; every transform keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle(pub [Vec3; 3]);

impl Triangle {
    /// Build a triangle from vertices in winding order.
    pub fn new(a: impl Into<Vec3>, b: impl Into<Vec3>, c: impl Into<Vec3>) -> Self {
        Self([a.into(), b.into(), c.into()])
    }

    /// Vertices in winding order.
    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.0
    }

    /// Apply `f` to every vertex, keeping winding.
    pub fn map(&self, mut f: impl FnMut(Vec3) -> Vec3) -> Triangle {
        let [a, b, c] = self.0;
        Triangle([f(a), f(b), f(c)])
    }

    /// Screen-plane (x, y) lengths of edges 1-2, 2-3 and 3-1.
    pub fn edge_lengths(&self) -> [f64; 3] {
        let [p1, p2, p3] = self.0;
        let len = |a: Vec3, b: Vec3| (a.x - b.x).hypot(a.y - b.y);
        [len(p1, p2), len(p2, p3), len(p3, p1)]
    }

    /// Face normal `(v1 - v0) x (v2 - v0)`, unit length unless degenerate.
    pub fn normal(&self) -> Vec3 {
        self.raw_normal().normalized()
    }

    /// Face normal without normalization.
    pub fn raw_normal(&self) -> Vec3 {
        let [a, b, c] = self.0;
        (b - a).cross(c - a)
    }

    /// Mean z of the three vertices.
    pub fn mean_z(&self) -> f64 {
        let [a, b, c] = self.0;
        (a.z + b.z + c.z) / 3.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/triangle.rs"]
mod tests;
