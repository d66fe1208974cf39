//! `minimal` is a small generative 2D/3D drawing toolkit.
//!
//! Scenes are built from drawable items (generative lines, shapes, text, images and
//! meshes) kept in a drawing [`Order`] and rendered through a [`DrawSurface`]: either a
//! [`RecordingSurface`] that keeps the calls as data, or a [`CpuSurface`] that rasterizes
//! them into premultiplied RGBA8 [`FrameRGBA`]s with `vello_cpu`.
//!
//! # Mesh pipeline
//!
//! Each frame copies a [`Mesh`] template into a [`MeshFrame`] and walks it through a
//! fixed sequence of stages:
//!
//! 1. **Pose**: rotate about the coordinate axes, then translate.
//! 2. **Cull**: drop faces turned away from the camera.
//! 3. **Light**: binary [`FlatShading`] against one light direction.
//! 4. **Project**: perspective [`Projection`] with the divide by `w`.
//! 5. **Viewport**: map normalized coordinates to pixels.
//! 6. **Sort**: stable painter's order on mean depth.
//! 7. **Rasterize**: wireframe edges or a sweep of strokes per face.
//!
//! Stages are typed, so skipping or reordering one is a compile error.
//!
//! # Generative lines
//!
//! A [`GenLine`] subdivides waypoints into `div` steps, can be displaced with
//! [`SimplexNoise`], colored in gradient bands, coupled with other lines and revealed or
//! erased step by step on every draw.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod display;
mod foundation;
mod generative;
mod geometry;
mod media;
mod pipeline;
mod render;
mod settings;
mod shapes;

pub use display::canvas::{Canvas, Frame, Layer};
pub use display::drawable::{Drawable, MeshScene};
pub use display::order::{Cursor, Order, Traversal, Traverse};
pub use display::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use display::store::FrameStore;
pub use foundation::color::Color;
pub use foundation::core::{Affine, BezPath, FrameRGBA, Point, Rect, Vec2};
pub use foundation::error::{MinimalError, MinimalResult};
pub use foundation::math::{Rng64, linspace};
pub use generative::line::{
    ColorBand, CoordSystem, GenLine, NoiseScale, RepeatStart, RevealPhase,
};
pub use generative::noise::SimplexNoise;
pub use geometry::matrix::{Axis, Mat4, Projection};
pub use geometry::mesh::{Mesh, RenderMode};
pub use geometry::obj::{load_obj, parse_obj};
pub use geometry::triangle::Triangle;
pub use geometry::vec3::Vec3;
pub use media::image::{CropRegion, FlipAxis, Image};
pub use pipeline::frame::{
    BeforeCull, BeforeLight, BeforeProject, Culled, FlatShading, Lit, MeshFrame, Placed, Posed,
    Projected, Screen, Sorted, TranslateOp, Viewport, backface_mask,
};
pub use pipeline::raster::RasterStyle;
pub use render::cpu::{CpuSurface, RenderSettings};
pub use render::paint::{ColorStop, Gradient, GradientKind, Paint};
pub use render::surface::{DrawCommand, DrawSurface, FontSlant, FontWeight, RecordingSurface, TextRun};
pub use settings::SceneSettings;
pub use shapes::animate::{AtEnd, BASE_FIELDS, Field, FieldValue, Track};
pub use shapes::shape::{PathSegment, Shape, ShapeKind, Style};
