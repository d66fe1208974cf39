//! Filled and outlined 2D shapes.
//!
//! Vertices and gradient anchors are stored relative to the shape position, so moving a
//! shape moves everything attached to it without extra bookkeeping.

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{MinimalError, MinimalResult};
use crate::render::paint::{Gradient, GradientKind, Paint};
use crate::render::surface::{DrawSurface, FontSlant, FontWeight, TextRun};
use crate::shapes::animate::{
    AtEnd, BASE_FIELDS, Field, FieldValue, Track, parse_slant, parse_weight,
};

/// One polygon edge, in coordinates relative to the shape position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Straight edge to a point.
    Line(Point),
    /// Cubic edge through two control points.
    Curve(Point, Point, Point),
}

/// Geometry of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Circle or arc centered on the position; angles in radians.
    Circle {
        /// Radius.
        radius: f64,
        /// Start angle.
        angle1: f64,
        /// End angle.
        angle2: f64,
    },
    /// Rectangle with its top-left corner on the position.
    Rectangle {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Triangle; the first vertex sits on the position.
    Triangle {
        /// Vertices relative to the position.
        vertices: [Point; 3],
    },
    /// Closed path starting at the position.
    Polygon {
        /// Edges in order.
        segments: Vec<PathSegment>,
    },
    /// Single line of text with its baseline-left corner on the position.
    Text {
        /// Content.
        text: String,
        /// Size in pixels.
        font_size: f64,
        /// Family name.
        font: Option<String>,
        /// Slant.
        slant: FontSlant,
        /// Weight.
        weight: FontWeight,
    },
}

const CIRCLE_FIELDS: [Field; 12] = [
    Field::X,
    Field::Y,
    Field::FillColor,
    Field::FillAlpha,
    Field::OutlineColor,
    Field::OutlineAlpha,
    Field::OutlineWidth,
    Field::ScaleX,
    Field::ScaleY,
    Field::Radius,
    Field::Angle1,
    Field::Angle2,
];

const RECTANGLE_FIELDS: [Field; 11] = [
    Field::X,
    Field::Y,
    Field::FillColor,
    Field::FillAlpha,
    Field::OutlineColor,
    Field::OutlineAlpha,
    Field::OutlineWidth,
    Field::ScaleX,
    Field::ScaleY,
    Field::Width,
    Field::Height,
];

const TEXT_FIELDS: [Field; 14] = [
    Field::X,
    Field::Y,
    Field::FillColor,
    Field::FillAlpha,
    Field::OutlineColor,
    Field::OutlineAlpha,
    Field::OutlineWidth,
    Field::ScaleX,
    Field::ScaleY,
    Field::Text,
    Field::FontSize,
    Field::Font,
    Field::FontSlant,
    Field::FontWeight,
];

impl ShapeKind {
    /// Fields [`Shape::animate`] accepts for this kind.
    pub fn animatable_fields(&self) -> &'static [Field] {
        match self {
            ShapeKind::Circle { .. } => &CIRCLE_FIELDS,
            ShapeKind::Rectangle { .. } => &RECTANGLE_FIELDS,
            ShapeKind::Text { .. } => &TEXT_FIELDS,
            ShapeKind::Triangle { .. } | ShapeKind::Polygon { .. } => &BASE_FIELDS,
        }
    }
}

/// Paint and placement options shared by every shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Fill color; `None` draws the outline only.
    pub fill: Option<Color>,
    /// Fill alpha.
    pub fill_alpha: f64,
    /// Outline color.
    pub outline: Color,
    /// Outline alpha.
    pub outline_alpha: f64,
    /// Outline width.
    pub outline_width: f64,
    /// Horizontal scale of the drawing transform.
    pub scale_x: f64,
    /// Vertical scale of the drawing transform.
    pub scale_y: f64,
    /// Rotation of the drawing transform, radians.
    pub rotation: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::BLACK),
            fill_alpha: 1.0,
            outline: Color::WHITE,
            outline_alpha: 1.0,
            outline_width: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

/// A positioned shape with style, optional gradient and animation tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    position: Point,
    style: Style,
    gradient: Option<Gradient>,
    label: Option<String>,
    tracks: Vec<(Field, Track)>,
}

impl Shape {
    fn with_kind(position: Point, kind: ShapeKind) -> Self {
        Self {
            kind,
            position,
            style: Style::default(),
            gradient: None,
            label: None,
            tracks: Vec::new(),
        }
    }

    /// Full circle.
    pub fn circle(center: impl Into<Point>, radius: f64) -> Self {
        Self::arc(center, radius, 0.0, std::f64::consts::TAU)
    }

    /// Arc from `angle1` to `angle2`, closed through its chord when filled.
    pub fn arc(center: impl Into<Point>, radius: f64, angle1: f64, angle2: f64) -> Self {
        Self::with_kind(
            center.into(),
            ShapeKind::Circle {
                radius,
                angle1,
                angle2,
            },
        )
    }

    /// Rectangle from its top-left corner.
    pub fn rectangle(top_left: impl Into<Point>, width: f64, height: f64) -> Self {
        Self::with_kind(top_left.into(), ShapeKind::Rectangle { width, height })
    }

    /// Triangle through three absolute points.
    pub fn triangle(vertices: [Point; 3]) -> Self {
        let origin = vertices[0];
        Self::with_kind(
            origin,
            ShapeKind::Triangle {
                vertices: vertices.map(|v| Point::ORIGIN + (v - origin)),
            },
        )
    }

    /// Empty polygon starting at `start`; add edges with [`Shape::line_to`] and
    /// [`Shape::curve_to`].
    pub fn polygon(start: impl Into<Point>) -> Self {
        Self::with_kind(
            start.into(),
            ShapeKind::Polygon {
                segments: Vec::new(),
            },
        )
    }

    /// Text run at its baseline-left corner.
    pub fn text(origin: impl Into<Point>, text: impl Into<String>, font_size: f64) -> Self {
        Self::with_kind(
            origin.into(),
            ShapeKind::Text {
                text: text.into(),
                font_size,
                font: None,
                slant: FontSlant::Normal,
                weight: FontWeight::Normal,
            },
        )
    }

    fn local(&self, p: Point) -> Point {
        Point::ORIGIN + (p - self.position)
    }

    /// Append a straight polygon edge to the absolute point `p`.
    pub fn line_to(mut self, p: impl Into<Point>) -> MinimalResult<Self> {
        let p = self.local(p.into());
        match &mut self.kind {
            ShapeKind::Polygon { segments } => segments.push(PathSegment::Line(p)),
            _ => return Err(MinimalError::type_error("line_to applies to polygons only")),
        }
        Ok(self)
    }

    /// Append a cubic polygon edge ending at the absolute point `p`.
    pub fn curve_to(
        mut self,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        p: impl Into<Point>,
    ) -> MinimalResult<Self> {
        let seg = PathSegment::Curve(
            self.local(c1.into()),
            self.local(c2.into()),
            self.local(p.into()),
        );
        match &mut self.kind {
            ShapeKind::Polygon { segments } => segments.push(seg),
            _ => return Err(MinimalError::type_error("curve_to applies to polygons only")),
        }
        Ok(self)
    }

    /// Replace the whole style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Fill color and alpha; `None` disables the fill.
    pub fn with_fill(mut self, fill: Option<Color>, alpha: f64) -> Self {
        self.style.fill = fill;
        self.style.fill_alpha = alpha;
        self
    }

    /// Outline color, alpha and width.
    pub fn with_outline(mut self, color: Color, alpha: f64, width: f64) -> Self {
        self.style.outline = color;
        self.style.outline_alpha = alpha;
        self.style.outline_width = width;
        self
    }

    /// Scale of the drawing transform.
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.style.scale_x = scale_x;
        self.style.scale_y = scale_y;
        self
    }

    /// Rotation of the drawing transform in radians.
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.style.rotation = radians;
        self
    }

    /// Attach a free-form label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text family, slant and weight; ignored by non-text shapes.
    pub fn with_font(mut self, family: Option<String>, slant: FontSlant, weight: FontWeight) -> Self {
        if let ShapeKind::Text {
            font,
            slant: s,
            weight: w,
            ..
        } = &mut self.kind
        {
            *font = family;
            *s = slant;
            *w = weight;
        }
        self
    }

    /// Geometry.
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Current position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Gradient in absolute coordinates, if any.
    pub fn gradient(&self) -> Option<Gradient> {
        self.gradient
            .as_ref()
            .map(|g| g.translated(self.position.to_vec2()))
    }

    /// Move the shape and everything attached to it.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn first_stop(&self) -> (Color, f64) {
        (
            self.style.fill.unwrap_or(Color::BLACK),
            self.style.fill_alpha,
        )
    }

    /// Add a stop to a linear gradient between the absolute points `from` and `to`.
    ///
    /// The first call creates the gradient with the fill color at offset 0; later calls
    /// only add stops.
    pub fn linear_gradient(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        alpha: f64,
        offset: f64,
    ) {
        let kind = GradientKind::Linear {
            from: self.local(from),
            to: self.local(to),
        };
        self.push_stop(kind, color, alpha, offset);
    }

    /// Add a stop to a two-circle radial gradient with absolute centers.
    ///
    /// The first call creates the gradient with the fill color at offset 0; later calls
    /// only add stops.
    pub fn radial_gradient(
        &mut self,
        (c1, r1): (Point, f64),
        (c2, r2): (Point, f64),
        color: Color,
        alpha: f64,
        offset: f64,
    ) {
        let kind = GradientKind::Radial {
            c1: self.local(c1),
            r1,
            c2: self.local(c2),
            r2,
        };
        self.push_stop(kind, color, alpha, offset);
    }

    fn push_stop(&mut self, kind: GradientKind, color: Color, alpha: f64, offset: f64) {
        let (c0, a0) = self.first_stop();
        self.gradient
            .get_or_insert_with(|| Gradient::new(kind, c0, a0))
            .add_stop(offset, color, alpha);
    }

    /// Drive `field` through `values`, one value per draw.
    ///
    /// Fails with `InvalidAttribute` when the field does not exist on this kind and with
    /// `Validation` for empty or mistyped values.
    pub fn animate(
        &mut self,
        field: Field,
        values: Vec<FieldValue>,
        at_end: AtEnd,
    ) -> MinimalResult<()> {
        let allowed = self.kind.animatable_fields();
        if !allowed.contains(&field) {
            let names: Vec<&str> = allowed.iter().map(|f| f.name()).collect();
            return Err(MinimalError::invalid_attribute(field.name(), &names));
        }
        if values.is_empty() {
            return Err(MinimalError::validation(format!(
                "field '{field}' needs at least one keyframe"
            )));
        }
        for v in &values {
            field.check(v)?;
        }
        self.tracks.retain(|(f, _)| *f != field);
        self.tracks.push((field, Track::new(values, at_end)));
        Ok(())
    }

    /// [`Shape::animate`] with the field and ending given by name.
    pub fn animate_named(
        &mut self,
        field: &str,
        values: Vec<FieldValue>,
        at_end: &str,
    ) -> MinimalResult<()> {
        let field: Field = field.parse()?;
        let at_end: AtEnd = at_end.parse()?;
        self.animate(field, values, at_end)
    }

    /// Move every track one keyframe forward and apply the new values.
    pub fn step_tracks(&mut self) {
        let mut tracks = std::mem::take(&mut self.tracks);
        for (field, track) in &mut tracks {
            if let Some(value) = track.next() {
                self.apply(*field, value);
            }
        }
        self.tracks = tracks;
    }

    fn apply(&mut self, field: Field, value: FieldValue) {
        let style = &mut self.style;
        match (field, value) {
            (Field::X, FieldValue::Number(v)) => self.position.x = v,
            (Field::Y, FieldValue::Number(v)) => self.position.y = v,
            (Field::FillColor, FieldValue::Color(c)) => style.fill = Some(c),
            (Field::FillAlpha, FieldValue::Number(v)) => style.fill_alpha = v,
            (Field::OutlineColor, FieldValue::Color(c)) => style.outline = c,
            (Field::OutlineAlpha, FieldValue::Number(v)) => style.outline_alpha = v,
            (Field::OutlineWidth, FieldValue::Number(v)) => style.outline_width = v,
            (Field::ScaleX, FieldValue::Number(v)) => style.scale_x = v,
            (Field::ScaleY, FieldValue::Number(v)) => style.scale_y = v,
            (field, value) => match (&mut self.kind, field, value) {
                (ShapeKind::Circle { radius, .. }, Field::Radius, FieldValue::Number(v)) => {
                    *radius = v;
                }
                (ShapeKind::Circle { angle1, .. }, Field::Angle1, FieldValue::Number(v)) => {
                    *angle1 = v;
                }
                (ShapeKind::Circle { angle2, .. }, Field::Angle2, FieldValue::Number(v)) => {
                    *angle2 = v;
                }
                (ShapeKind::Rectangle { width, .. }, Field::Width, FieldValue::Number(v)) => {
                    *width = v;
                }
                (ShapeKind::Rectangle { height, .. }, Field::Height, FieldValue::Number(v)) => {
                    *height = v;
                }
                (ShapeKind::Text { text, .. }, Field::Text, FieldValue::Text(s)) => *text = s,
                (ShapeKind::Text { font_size, .. }, Field::FontSize, FieldValue::Number(v)) => {
                    *font_size = v;
                }
                (ShapeKind::Text { font, .. }, Field::Font, FieldValue::Text(s)) => {
                    *font = Some(s);
                }
                (ShapeKind::Text { slant, .. }, Field::FontSlant, FieldValue::Text(s)) => {
                    *slant = parse_slant(&s).unwrap_or(*slant);
                }
                (ShapeKind::Text { weight, .. }, Field::FontWeight, FieldValue::Text(s)) => {
                    *weight = parse_weight(&s).unwrap_or(*weight);
                }
                (_, field, value) => {
                    tracing::warn!(%field, %value, "keyframe does not fit shape; skipped");
                }
            },
        }
    }

    fn transform(&self) -> Affine {
        Affine::scale_non_uniform(self.style.scale_x, self.style.scale_y)
            * Affine::rotate(self.style.rotation)
    }

    fn fill_paint(&self) -> Option<Paint> {
        let fill = self.style.fill?;
        Some(match self.gradient() {
            Some(g) => Paint::Gradient(g),
            None => Paint::solid(fill, self.style.fill_alpha),
        })
    }

    /// Emit the shape, then advance its tracks.
    ///
    /// Outlined shapes fill (when a fill is set) and then stroke their outline; text is
    /// shown in the fill color. The transform is reset afterwards.
    pub fn draw(&mut self, surface: &mut dyn DrawSurface) -> MinimalResult<()> {
        surface.set_transform(self.transform());
        let origin = self.position;
        let at = |p: Point| origin + p.to_vec2();

        match &self.kind {
            ShapeKind::Text {
                text,
                font_size,
                font,
                slant,
                weight,
            } => {
                let (color, alpha) = self.first_stop();
                surface.show_text(&TextRun {
                    origin,
                    text: text.clone(),
                    font_size: *font_size,
                    font: font.clone(),
                    slant: *slant,
                    weight: *weight,
                    color,
                    alpha,
                })?;
            }
            kind => {
                match kind {
                    ShapeKind::Circle {
                        radius,
                        angle1,
                        angle2,
                    } => surface.arc(origin, *radius, *angle1, *angle2),
                    ShapeKind::Rectangle { width, height } => {
                        surface.move_to(origin);
                        surface.line_to(origin + Vec2::new(*width, 0.0));
                        surface.line_to(origin + Vec2::new(*width, *height));
                        surface.line_to(origin + Vec2::new(0.0, *height));
                        surface.close_path();
                    }
                    ShapeKind::Triangle { vertices } => {
                        surface.move_to(at(vertices[0]));
                        surface.line_to(at(vertices[1]));
                        surface.line_to(at(vertices[2]));
                        surface.line_to(at(vertices[0]));
                        surface.close_path();
                    }
                    ShapeKind::Polygon { segments } => {
                        surface.move_to(origin);
                        for seg in segments {
                            match *seg {
                                PathSegment::Line(p) => surface.line_to(at(p)),
                                PathSegment::Curve(c1, c2, p) => {
                                    surface.curve_to(at(c1), at(c2), at(p));
                                }
                            }
                        }
                        surface.close_path();
                    }
                    ShapeKind::Text { .. } => {}
                }
                if let Some(paint) = self.fill_paint() {
                    surface.fill(&paint);
                }
                surface.stroke(
                    self.style.outline,
                    self.style.outline_alpha,
                    self.style.outline_width,
                );
            }
        }

        surface.set_transform(Affine::IDENTITY);
        self.step_tracks();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/shape.rs"]
mod tests;
