use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, FrameRGBA, Point};
use crate::foundation::error::{MinimalError, MinimalResult};
use crate::media::image::Image;
use crate::render::paint::{Gradient, GradientKind, Paint};
use crate::render::surface::{DrawSurface, FontSlant, FontWeight, TextRun, append_arc};

/// Raster settings for [`CpuSurface`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Color every frame starts from; `None` leaves it transparent.
    pub background: Option<Color>,
    /// Flattening tolerance for arcs, in pixels.
    pub tolerance: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Some(Color::WHITE),
            tolerance: 0.1,
        }
    }
}

impl RenderSettings {
    /// Builder-style background override.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Builder-style tolerance override.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

struct RegisteredFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// [`DrawSurface`] that rasterizes on the CPU with `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    settings: RenderSettings,
    ctx: vello_cpu::RenderContext,
    transform: Affine,
    path: BezPath,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    fonts: Vec<RegisteredFont>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("settings", &self.settings)
            .field(
                "fonts",
                &self.fonts.iter().map(|f| f.family.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CpuSurface {
    /// Surface of `width x height` pixels, cleared to the configured background.
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> MinimalResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| MinimalError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| MinimalError::render("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(MinimalError::render("surface size must be non-zero"));
        }
        let mut surface = Self {
            width: width_u16,
            height: height_u16,
            settings,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            transform: Affine::IDENTITY,
            path: BezPath::new(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: Vec::new(),
        };
        surface.clear_background();
        Ok(surface)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Register a TrueType/OpenType font and return its family name.
    ///
    /// The first registered font is the fallback for text runs that name no family, or
    /// a family that was never registered.
    pub fn register_font(&mut self, bytes: &[u8]) -> MinimalResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            MinimalError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MinimalError::validation("registered font family has no name"))?
            .to_string();
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), 0);
        tracing::debug!(family = %family, "registered font");
        self.fonts.push(RegisteredFont {
            family: family.clone(),
            data,
        });
        Ok(family)
    }

    /// Drop everything drawn so far and start again from the background.
    pub fn reset(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.transform = Affine::IDENTITY;
        self.path = BezPath::new();
        self.clear_background();
    }

    /// Rasterize everything drawn so far.
    #[tracing::instrument(skip_all, fields(width = self.width, height = self.height))]
    pub fn render(&mut self) -> MinimalResult<FrameRGBA> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA::from_raw(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
            true,
        )
    }

    fn clear_background(&mut self) {
        let Some(bg) = self.settings.background else {
            return;
        };
        let [r, g, b, a] = bg.to_rgba8(1.0);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    fn font_for(&self, family: Option<&str>) -> Option<&RegisteredFont> {
        family
            .and_then(|name| self.fonts.iter().find(|f| f.family.eq_ignore_ascii_case(name)))
            .or_else(|| self.fonts.first())
    }
}

impl DrawSurface for CpuSurface {
    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(p);
        } else {
            self.path.line_to(p);
        }
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(c1);
        }
        self.path.curve_to(c1, c2, p);
    }

    fn arc(&mut self, center: Point, radius: f64, angle1: f64, angle2: f64) {
        append_arc(
            &mut self.path,
            center,
            radius,
            angle1,
            angle2,
            self.settings.tolerance,
        );
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn fill(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid { color, alpha } => self.ctx.set_paint(color_to_cpu(*color, *alpha)),
            Paint::Gradient(g) => self.ctx.set_paint(gradient_to_cpu(g)),
        }
        self.ctx.fill_path(&bezpath_to_cpu(&self.path));
    }

    fn stroke(&mut self, color: Color, alpha: f64, width: f64) {
        self.ctx.set_paint(color_to_cpu(color, alpha));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(&self.path));
        self.path = BezPath::new();
    }

    fn show_text(&mut self, run: &TextRun) -> MinimalResult<()> {
        if run.text.is_empty() {
            return Ok(());
        }
        if !run.font_size.is_finite() || run.font_size <= 0.0 {
            return Err(MinimalError::validation(
                "text font_size must be finite and > 0",
            ));
        }
        let Some(font) = self.font_for(run.font.as_deref()) else {
            tracing::warn!(text = %run.text, "no font registered; skipping text");
            return Ok(());
        };
        let family = font.family.clone();
        let font_data = font.data.clone();

        let [r, g, b, a] = run.color.to_rgba8(run.alpha);
        let brush = TextBrushRgba8 { r, g, b, a };
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &run.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(
            run.font_size as f32,
        ));
        builder.push_default(parley::style::StyleProperty::FontStyle(match run.slant {
            FontSlant::Normal => parley::style::FontStyle::Normal,
            FontSlant::Italic => parley::style::FontStyle::Italic,
            FontSlant::Oblique => parley::style::FontStyle::Oblique(None),
        }));
        builder.push_default(parley::style::StyleProperty::FontWeight(match run.weight {
            FontWeight::Normal => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        }));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&run.text);
        layout.break_all_lines(None);

        // Layout space puts the top of the first line at y = 0; move its baseline onto
        // the run origin.
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);
        let place = Affine::translate((run.origin.x, run.origin.y - baseline));
        self.ctx.set_transform(affine_to_cpu(self.transform * place));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let brush = glyph_run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font_data)
                    .font_size(glyph_run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        self.ctx.set_transform(affine_to_cpu(self.transform));
        Ok(())
    }

    fn draw_image(&mut self, image: &Image) -> MinimalResult<()> {
        let Some(region) = image.visible_region(self.width(), self.height()) else {
            return Ok(());
        };
        let rgba = image.premultiplied_region(&region);
        let pixmap = premul_bytes_to_pixmap(&rgba, region.width, region.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(region.dst_x),
            f64::from(region.dst_y),
        )));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(region.width),
            f64::from(region.height),
        ));
        self.ctx.set_transform(affine_to_cpu(self.transform));
        Ok(())
    }
}

fn color_to_cpu(color: Color, alpha: f64) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = color.to_rgba8(alpha);
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn gradient_to_cpu(gradient: &Gradient) -> vello_cpu::peniko::Gradient {
    let stops: Vec<vello_cpu::peniko::ColorStop> = gradient
        .stops
        .iter()
        .map(|s| {
            vello_cpu::peniko::ColorStop::from((s.offset as f32, color_to_cpu(s.color, s.alpha)))
        })
        .collect();
    let base = match gradient.kind {
        GradientKind::Linear { from, to } => {
            vello_cpu::peniko::Gradient::new_linear(point_to_cpu(from), point_to_cpu(to))
        }
        GradientKind::Radial { c1, r1, c2, r2 } => {
            vello_cpu::peniko::Gradient::new_two_point_radial(
                point_to_cpu(c1),
                r1 as f32,
                point_to_cpu(c2),
                r2 as f32,
            )
        }
    };
    base.with_stops(stops.as_slice())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> MinimalResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MinimalError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MinimalError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(MinimalError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
