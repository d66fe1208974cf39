use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Point};
use crate::foundation::error::MinimalResult;
use crate::media::image::Image;
use crate::render::paint::Paint;

/// Font slant requested by a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
    /// Oblique.
    Oblique,
}

/// Font weight requested by a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// A single line of text placed with its baseline-left corner at `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Baseline-left anchor.
    pub origin: Point,
    /// UTF-8 text.
    pub text: String,
    /// Em size in pixels.
    pub font_size: f64,
    /// Requested family name; surfaces fall back to their registered font.
    pub font: Option<String>,
    /// Slant.
    pub slant: FontSlant,
    /// Weight.
    pub weight: FontWeight,
    /// Text color.
    pub color: Color,
    /// Text alpha.
    pub alpha: f64,
}

/// The rasterizer collaborator.
///
/// Path calls accumulate into a current path. [`DrawSurface::fill`] paints it and keeps it
/// so an outline can follow; [`DrawSurface::stroke`] paints and clears it. Coordinates are
/// mapped through the transform set by [`DrawSurface::set_transform`].
pub trait DrawSurface {
    /// Replace the current user-space transform.
    fn set_transform(&mut self, transform: Affine);
    /// Start a new subpath.
    fn move_to(&mut self, p: Point);
    /// Straight segment to `p`.
    fn line_to(&mut self, p: Point);
    /// Cubic segment to `p`.
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);
    /// Circular arc from `angle1` to `angle2` (radians, increasing angle), joined to the
    /// current point with a straight segment when one exists.
    fn arc(&mut self, center: Point, radius: f64, angle1: f64, angle2: f64);
    /// Close the current subpath.
    fn close_path(&mut self);
    /// Fill the current path, keeping it.
    fn fill(&mut self, paint: &Paint);
    /// Stroke the current path, then clear it.
    fn stroke(&mut self, color: Color, alpha: f64, width: f64);
    /// Draw a line of text.
    fn show_text(&mut self, run: &TextRun) -> MinimalResult<()>;
    /// Composite an image at its position.
    fn draw_image(&mut self, image: &Image) -> MinimalResult<()>;
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `set_transform`.
    SetTransform(Affine),
    /// `move_to`.
    MoveTo(Point),
    /// `line_to`.
    LineTo(Point),
    /// `curve_to`.
    CurveTo(Point, Point, Point),
    /// `arc`.
    Arc {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Start angle.
        angle1: f64,
        /// End angle.
        angle2: f64,
    },
    /// `close_path`.
    ClosePath,
    /// `fill`.
    Fill(Paint),
    /// `stroke`.
    Stroke {
        /// Color.
        color: Color,
        /// Alpha.
        alpha: f64,
        /// Line width.
        width: f64,
    },
    /// `show_text`.
    Text(TextRun),
    /// `draw_image`, recorded by placement only.
    Image {
        /// Top-left corner.
        position: Point,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

/// Surface that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recording empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded strokes.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn set_transform(&mut self, transform: Affine) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.commands.push(DrawCommand::CurveTo(c1, c2, p));
    }

    fn arc(&mut self, center: Point, radius: f64, angle1: f64, angle2: f64) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            angle1,
            angle2,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Fill(paint.clone()));
    }

    fn stroke(&mut self, color: Color, alpha: f64, width: f64) {
        self.commands.push(DrawCommand::Stroke {
            color,
            alpha,
            width,
        });
    }

    fn show_text(&mut self, run: &TextRun) -> MinimalResult<()> {
        self.commands.push(DrawCommand::Text(run.clone()));
        Ok(())
    }

    fn draw_image(&mut self, image: &Image) -> MinimalResult<()> {
        self.commands.push(DrawCommand::Image {
            position: image.position(),
            width: image.width(),
            height: image.height(),
        });
        Ok(())
    }
}

/// Append a circular arc to `path` with the surface arc semantics: the end angle is
/// raised by whole turns until it is not below the start angle.
pub(crate) fn append_arc(
    path: &mut BezPath,
    center: Point,
    radius: f64,
    angle1: f64,
    mut angle2: f64,
    tolerance: f64,
) {
    let tau = std::f64::consts::TAU;
    if angle2 < angle1 {
        angle2 += ((angle1 - angle2) / tau).ceil() * tau;
    }
    let start = center + kurbo::Vec2::from_angle(angle1) * radius;
    if path.elements().is_empty() {
        path.move_to(start);
    } else {
        path.line_to(start);
    }
    let arc = kurbo::Arc::new(
        center,
        (radius, radius),
        angle1,
        angle2 - angle1,
        0.0,
    );
    arc.to_cubic_beziers(tolerance, |c1, c2, p| path.curve_to(c1, c2, p));
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
