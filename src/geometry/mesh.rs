//! Mesh templates copied into a fresh pipeline frame every draw.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::MinimalResult;
use crate::geometry::obj;
use crate::geometry::triangle::Triangle;
use crate::geometry::vec3::Vec3;

/// How a mesh is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Stroke the three edges of every triangle.
    #[default]
    Wireframe,
    /// Sweep-fill every triangle with its shade.
    Filled,
}

/// Immutable template geometry.
///
/// A template is never transformed in place; [`Mesh::frame`] copies its triangles into a
/// per-frame pipeline value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    mode: RenderMode,
}

impl Mesh {
    /// Build a mesh from triangles in order.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            mode: RenderMode::default(),
        }
    }

    /// Return the mesh with a different render mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse OBJ text.
    pub fn from_obj_str(src: &str) -> MinimalResult<Self> {
        Ok(Self::new(obj::parse_obj(src)?))
    }

    /// Read an OBJ file.
    pub fn load_obj(path: impl AsRef<Path>) -> MinimalResult<Self> {
        Ok(Self::new(obj::load_obj(path)?))
    }

    /// Unit cube spanning `[0, 1]^3`, two triangles per face, outward winding for a viewer
    /// looking down +z.
    pub fn unit_cube() -> Self {
        let t = |a: [f64; 3], b: [f64; 3], c: [f64; 3]| Triangle::new(a, b, c);
        Self::new(vec![
            // south
            t([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]),
            t([0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
            // east
            t([1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]),
            t([1.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]),
            // north
            t([1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]),
            t([1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
            // west
            t([0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
            t([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]),
            // top
            t([0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]),
            t([0.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]),
            // bottom
            t([1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]),
            t([1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
        ])
    }

    /// Triangles in order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Render mode.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Copy of the mesh moved so its bounding box is centered on the origin.
    pub fn centered(&self) -> Mesh {
        if self.triangles.is_empty() {
            return self.clone();
        }
        let mut lo = Vec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut hi = Vec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in self.triangles.iter().flat_map(|t| t.vertices()) {
            lo = Vec3::new(lo.x.min(v.x), lo.y.min(v.y), lo.z.min(v.z));
            hi = Vec3::new(hi.x.max(v.x), hi.y.max(v.y), hi.z.max(v.z));
        }
        let center = (lo + hi) * 0.5;
        Mesh {
            triangles: self.triangles.iter().map(|t| t.map(|v| v - center)).collect(),
            mode: self.mode,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mesh.rs"]
mod tests;
