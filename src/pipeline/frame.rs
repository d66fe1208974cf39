//! Per-frame mesh pipeline.
//!
//! A [`MeshFrame`] is a working copy of a [`Mesh`] template that moves through the stages
//! `Posed -> Placed -> Culled -> Lit -> Projected -> Screen -> Sorted`. Each stage is a
//! marker type, so calling a step out of order does not compile. Culling and lighting are
//! optional; every other step runs once, in order.

use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{MinimalError, MinimalResult};
use crate::geometry::matrix::{Axis, Mat4};
use crate::geometry::mesh::{Mesh, RenderMode};
use crate::geometry::triangle::Triangle;
use crate::geometry::vec3::Vec3;
use crate::pipeline::raster::{self, RasterStyle};
use crate::render::surface::DrawSurface;

/// Model space; rotations and translations allowed.
#[derive(Debug, Clone, Copy)]
pub struct Posed;
/// Translated into world space; further translations allowed.
#[derive(Debug, Clone, Copy)]
pub struct Placed;
/// Back faces removed.
#[derive(Debug, Clone, Copy)]
pub struct Culled;
/// Flat shades assigned.
#[derive(Debug, Clone, Copy)]
pub struct Lit;
/// Perspective applied; coordinates normalized to `[-1, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct Projected;
/// Mapped to pixel coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Screen;
/// Depth ordered and ready to rasterize.
#[derive(Debug, Clone, Copy)]
pub struct Sorted;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Posed {}
    impl Sealed for super::Placed {}
    impl Sealed for super::Culled {}
    impl Sealed for super::Lit {}
}

/// Stages that may still cull.
pub trait BeforeCull: sealed::Sealed {}
impl BeforeCull for Posed {}
impl BeforeCull for Placed {}

/// Stages that may still be lit.
pub trait BeforeLight: sealed::Sealed {}
impl BeforeLight for Posed {}
impl BeforeLight for Placed {}
impl BeforeLight for Culled {}

/// Stages that may be projected.
pub trait BeforeProject: sealed::Sealed {}
impl BeforeProject for Posed {}
impl BeforeProject for Placed {}
impl BeforeProject for Culled {}
impl BeforeProject for Lit {}

/// Element-wise operation used by `translate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslateOp {
    /// `v + d`
    #[default]
    Add,
    /// `v - d`
    Sub,
    /// `v * d` per component.
    Mul,
    /// `v / d` per component; zero components are rejected.
    Div,
}

impl TranslateOp {
    /// Accepted names.
    pub const NAMES: [&'static str; 4] = ["add", "sub", "mul", "div"];

    /// Apply to one vertex.
    pub fn apply(self, v: Vec3, d: Vec3) -> Vec3 {
        match self {
            TranslateOp::Add => v + d,
            TranslateOp::Sub => v - d,
            TranslateOp::Mul => v.mul_elem(d),
            TranslateOp::Div => v.div_elem(d),
        }
    }
}

impl FromStr for TranslateOp {
    type Err = MinimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(TranslateOp::Add),
            "sub" => Ok(TranslateOp::Sub),
            "mul" => Ok(TranslateOp::Mul),
            "div" => Ok(TranslateOp::Div),
            other => Err(MinimalError::invalid_argument(other, &Self::NAMES)),
        }
    }
}

/// Binary flat shading: faces turned toward the light get `lit`, the rest `unlit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatShading {
    /// Shade for faces with a positive light dot product.
    pub lit: Color,
    /// Shade for every other face.
    pub unlit: Color,
}

impl Default for FlatShading {
    fn default() -> Self {
        Self {
            lit: Color::from_luminance(0.6),
            unlit: Color::from_luminance(0.2),
        }
    }
}

impl FlatShading {
    /// Replace the lit shade.
    pub fn with_lit(mut self, lit: Color) -> Self {
        self.lit = lit;
        self
    }

    /// Replace the unlit shade.
    pub fn with_unlit(mut self, unlit: Color) -> Self {
        self.unlit = unlit;
        self
    }
}

/// Target pixel rectangle for the viewport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Viewport of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Face {
    tri: Triangle,
    level: Option<f64>,
    shade: Option<Color>,
}

/// Working copy of a mesh for one frame.
#[derive(Debug, Clone)]
pub struct MeshFrame<S> {
    faces: Vec<Face>,
    mask: Option<Vec<bool>>,
    mode: RenderMode,
    _stage: PhantomData<S>,
}

impl Mesh {
    /// Copy the template into a fresh pipeline value.
    pub fn frame(&self) -> MeshFrame<Posed> {
        MeshFrame {
            faces: self
                .triangles()
                .iter()
                .map(|&tri| Face {
                    tri,
                    level: None,
                    shade: None,
                })
                .collect(),
            mask: None,
            mode: self.mode(),
            _stage: PhantomData,
        }
    }
}

/// Visibility of every triangle seen from `camera`: `normal . (v0 - camera) < 0`.
pub fn backface_mask(tris: &[Triangle], camera: Vec3) -> Vec<bool> {
    tris.iter()
        .map(|t| t.normal().dot(t.0[0] - camera) < 0.0)
        .collect()
}

impl<S> MeshFrame<S> {
    fn into_stage<T>(self) -> MeshFrame<T> {
        MeshFrame {
            faces: self.faces,
            mask: self.mask,
            mode: self.mode,
            _stage: PhantomData,
        }
    }

    fn map_vertices(mut self, mut f: impl FnMut(Vec3) -> Vec3) -> Self {
        for face in &mut self.faces {
            face.tri = face.tri.map(&mut f);
        }
        self
    }

    /// Current triangles in order.
    pub fn triangles(&self) -> Vec<Triangle> {
        self.faces.iter().map(|f| f.tri).collect()
    }

    /// Number of active triangles.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether no triangles remain.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Render mode inherited from the template.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Visibility over the template's triangles, if culling ran.
    pub fn visibility_mask(&self) -> Option<&[bool]> {
        self.mask.as_deref()
    }

    /// Raw light dot products of the active triangles, if lighting ran.
    pub fn light_levels(&self) -> Option<Vec<f64>> {
        self.faces.iter().map(|f| f.level).collect()
    }

    /// Shades of the active triangles, if lighting ran.
    pub fn shades(&self) -> Option<Vec<Color>> {
        self.faces.iter().map(|f| f.shade).collect()
    }

    /// Mean z of every active triangle.
    pub fn depths(&self) -> Vec<f64> {
        self.faces.iter().map(|f| f.tri.mean_z()).collect()
    }
}

fn translate_faces<S>(
    frame: MeshFrame<S>,
    delta: Vec3,
    op: TranslateOp,
) -> MinimalResult<MeshFrame<Placed>> {
    if op == TranslateOp::Div && (delta.x == 0.0 || delta.y == 0.0 || delta.z == 0.0) {
        return Err(MinimalError::arithmetic(format!(
            "translate div by zero component ({}, {}, {})",
            delta.x, delta.y, delta.z
        )));
    }
    Ok(frame
        .map_vertices(|v| op.apply(v, delta))
        .into_stage())
}

impl MeshFrame<Posed> {
    /// Rotate every vertex about `axis` by `theta` radians.
    pub fn rotate(self, axis: Axis, theta: f64) -> Self {
        let m = Mat4::rotation(axis, theta);
        self.map_vertices(|v| m.transform_point(v))
    }

    /// Combine every vertex with `delta` using `op`.
    pub fn translate(self, delta: Vec3, op: TranslateOp) -> MinimalResult<MeshFrame<Placed>> {
        translate_faces(self, delta, op)
    }
}

impl MeshFrame<Placed> {
    /// Combine every vertex with `delta` using `op`.
    pub fn translate(self, delta: Vec3, op: TranslateOp) -> MinimalResult<MeshFrame<Placed>> {
        translate_faces(self, delta, op)
    }
}

impl<S: BeforeCull> MeshFrame<S> {
    /// Drop triangles facing away from `camera`, recording the mask.
    #[tracing::instrument(skip_all, fields(tris = self.faces.len()))]
    pub fn cull(self, camera: Vec3) -> MeshFrame<Culled> {
        let tris = self.triangles();
        let mask = backface_mask(&tris, camera);
        let faces: Vec<Face> = self
            .faces
            .iter()
            .zip(&mask)
            .filter(|(_, visible)| **visible)
            .map(|(f, _)| *f)
            .collect();
        tracing::debug!(kept = faces.len(), culled = mask.len() - faces.len(), "cull");
        MeshFrame {
            faces,
            mask: Some(mask),
            mode: self.mode,
            _stage: PhantomData,
        }
    }
}

impl<S: BeforeLight> MeshFrame<S> {
    /// Assign each active triangle a flat shade from the light direction.
    pub fn illuminate(mut self, light: Vec3, shading: &FlatShading) -> MeshFrame<Lit> {
        let light = light.normalized();
        for face in &mut self.faces {
            let level = face.tri.normal().dot(light);
            face.level = Some(level);
            face.shade = Some(if level > 0.0 {
                shading.lit
            } else {
                shading.unlit
            });
        }
        self.into_stage()
    }
}

impl<S: BeforeProject> MeshFrame<S> {
    /// Apply a projection matrix with perspective divide.
    pub fn project(self, projection: &Mat4) -> MeshFrame<Projected> {
        self.map_vertices(|v| projection.transform_point(v))
            .into_stage()
    }
}

impl MeshFrame<Projected> {
    /// Map normalized x and y to pixels; z is kept for sorting.
    pub fn viewport(self, viewport: Viewport) -> MeshFrame<Screen> {
        self.map_vertices(|v| {
            Vec3::new(
                (v.x + 1.0) * 0.5 * viewport.width,
                (v.y + 1.0) * 0.5 * viewport.height,
                v.z,
            )
        })
        .into_stage()
    }
}

impl MeshFrame<Screen> {
    /// Stable sort by ascending mean z.
    #[tracing::instrument(skip_all, fields(tris = self.faces.len()))]
    pub fn sort(mut self) -> MeshFrame<Sorted> {
        self.faces
            .sort_by(|a, b| a.tri.mean_z().total_cmp(&b.tri.mean_z()));
        self.into_stage()
    }
}

impl MeshFrame<Sorted> {
    /// Emit stroke commands for every triangle in order; returns the stroke count.
    ///
    /// Wireframe strokes the three edges in winding order. Filled sweeps each triangle
    /// with its shade, or `style.color` when lighting never ran.
    #[tracing::instrument(skip_all, fields(tris = self.faces.len(), mode = ?self.mode))]
    pub fn rasterize(&self, surface: &mut dyn DrawSurface, style: &RasterStyle) -> usize {
        let mut strokes = 0;
        for face in &self.faces {
            strokes += match self.mode {
                RenderMode::Wireframe => raster::wireframe(surface, &face.tri, style),
                RenderMode::Filled => {
                    let color = face.shade.unwrap_or(style.color);
                    raster::sweep_fill(surface, &face.tri, &style.with_color(color))
                }
            };
        }
        tracing::debug!(strokes, "rasterized");
        strokes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/frame.rs"]
mod tests;
