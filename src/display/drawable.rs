//! Items a frame or canvas can draw, including animated mesh scenes.

use crate::foundation::error::MinimalResult;
use crate::generative::line::GenLine;
use crate::geometry::matrix::{Axis, Projection};
use crate::geometry::mesh::Mesh;
use crate::geometry::vec3::Vec3;
use crate::media::image::Image;
use crate::pipeline::frame::{FlatShading, TranslateOp, Viewport};
use crate::pipeline::raster::RasterStyle;
use crate::render::surface::DrawSurface;
use crate::shapes::shape::Shape;

/// Anything a frame or canvas can draw.
#[derive(Debug, Clone)]
pub enum Drawable {
    /// Generative polyline.
    Line(GenLine),
    /// 2D shape.
    Shape(Shape),
    /// Raster image.
    Image(Image),
    /// Animated 3D mesh.
    Mesh(MeshScene),
}

impl Drawable {
    /// Emit this item's draw calls and advance its animation state.
    pub fn draw(&mut self, surface: &mut dyn DrawSurface) -> MinimalResult<()> {
        match self {
            Drawable::Line(line) => {
                line.draw(surface);
                Ok(())
            }
            Drawable::Shape(shape) => shape.draw(surface),
            Drawable::Image(image) => surface.draw_image(image),
            Drawable::Mesh(scene) => {
                scene.draw(surface)?;
                Ok(())
            }
        }
    }

    /// The line, if this is one.
    pub fn as_line_mut(&mut self) -> Option<&mut GenLine> {
        match self {
            Drawable::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The shape, if this is one.
    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match self {
            Drawable::Shape(shape) => Some(shape),
            _ => None,
        }
    }
}

impl From<GenLine> for Drawable {
    fn from(line: GenLine) -> Self {
        Drawable::Line(line)
    }
}

impl From<Shape> for Drawable {
    fn from(shape: Shape) -> Self {
        Drawable::Shape(shape)
    }
}

impl From<Image> for Drawable {
    fn from(image: Image) -> Self {
        Drawable::Image(image)
    }
}

impl From<MeshScene> for Drawable {
    fn from(scene: MeshScene) -> Self {
        Drawable::Mesh(scene)
    }
}

/// A mesh template plus the motion and camera that pose it each frame.
///
/// Every draw copies the template, rotates it by `rate * frame` around each spin axis in
/// order, translates it by `offset`, culls against `camera`, shades when a light is set,
/// projects, maps to the viewport, sorts and rasterizes.
#[derive(Debug, Clone)]
pub struct MeshScene {
    template: Mesh,
    spin: Vec<(Axis, f64)>,
    offset: Vec3,
    camera: Vec3,
    light: Option<Vec3>,
    shading: FlatShading,
    projection: Projection,
    viewport: Viewport,
    style: RasterStyle,
    frame: u64,
}

impl MeshScene {
    /// Scene for `template` drawn into `viewport`, unrotated, at the origin.
    pub fn new(template: Mesh, viewport: Viewport) -> Self {
        Self {
            template,
            spin: Vec::new(),
            offset: Vec3::ZERO,
            camera: Vec3::ZERO,
            light: None,
            shading: FlatShading::default(),
            projection: Projection::default()
                .with_aspect(viewport.height / viewport.width.max(1.0)),
            viewport,
            style: RasterStyle::default(),
            frame: 0,
        }
    }

    /// Add a spin of `rate` radians per frame around `axis`.
    pub fn with_spin(mut self, axis: Axis, rate: f64) -> Self {
        self.spin.push((axis, rate));
        self
    }

    /// Model offset applied after rotation.
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Camera position used for culling.
    pub fn with_camera(mut self, camera: Vec3) -> Self {
        self.camera = camera;
        self
    }

    /// Light direction; `None` draws every face in the raster color.
    pub fn with_light(mut self, light: Option<Vec3>) -> Self {
        self.light = light;
        self
    }

    /// Lit/unlit shades.
    pub fn with_shading(mut self, shading: FlatShading) -> Self {
        self.shading = shading;
        self
    }

    /// Projection parameters.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Stroke style.
    pub fn with_style(mut self, style: RasterStyle) -> Self {
        self.style = style;
        self
    }

    /// Frames drawn so far.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    /// Run the pipeline for the current frame and advance; returns the stroke count.
    #[tracing::instrument(skip_all, fields(frame = self.frame))]
    pub fn draw(&mut self, surface: &mut dyn DrawSurface) -> MinimalResult<usize> {
        let t = self.frame as f64;
        let mut posed = self.template.frame();
        for &(axis, rate) in &self.spin {
            posed = posed.rotate(axis, rate * t);
        }
        let culled = posed
            .translate(self.offset, TranslateOp::Add)?
            .cull(self.camera);
        let matrix = self.projection.matrix();
        let projected = match self.light {
            Some(light) => culled.illuminate(light, &self.shading).project(&matrix),
            None => culled.project(&matrix),
        };
        let strokes = projected
            .viewport(self.viewport)
            .sort()
            .rasterize(surface, &self.style);
        self.frame += 1;
        Ok(strokes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/drawable.rs"]
mod tests;
