//! Static frames and animated canvases rendered on the CPU surface.

use std::path::Path;
use std::time::Duration;

use crate::display::drawable::Drawable;
use crate::display::order::{Cursor, Order, Traversal};
use crate::display::sink::{FrameSink, SinkConfig, write_png};
use crate::display::store::FrameStore;
use crate::foundation::color::Color;
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{MinimalError, MinimalResult};
use crate::media::image::Image;
use crate::render::cpu::{CpuSurface, RenderSettings};
use crate::render::surface::DrawSurface;
use crate::settings::SceneSettings;

/// A static frame: items are drawn the moment they are added.
#[derive(Debug)]
pub struct Frame {
    surface: CpuSurface,
}

impl Frame {
    /// Blank frame filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> MinimalResult<Self> {
        Self::with_settings(
            width,
            height,
            RenderSettings::default().with_background(Some(background)),
        )
    }

    /// Blank frame with explicit raster settings.
    pub fn with_settings(width: u32, height: u32, settings: RenderSettings) -> MinimalResult<Self> {
        Ok(Self {
            surface: CpuSurface::new(width, height, settings)?,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Underlying surface, for font registration.
    pub fn surface_mut(&mut self) -> &mut CpuSurface {
        &mut self.surface
    }

    /// Draw one item now.
    pub fn add(&mut self, item: impl Into<Drawable>) -> MinimalResult<()> {
        item.into().draw(&mut self.surface)
    }

    /// Draw items now, in order.
    pub fn add_many(&mut self, items: impl IntoIterator<Item = Drawable>) -> MinimalResult<()> {
        for mut item in items {
            item.draw(&mut self.surface)?;
        }
        Ok(())
    }

    /// Rasterize what has been drawn.
    pub fn pixels(&mut self) -> MinimalResult<FrameRGBA> {
        self.surface.render()
    }

    /// Save the frame as a PNG.
    pub fn to_png(&mut self, path: impl AsRef<Path>) -> MinimalResult<()> {
        let frame = self.pixels()?;
        write_png(path.as_ref(), &frame)
    }

    /// Store the frame's pixels as `group/name`.
    pub fn save_to(&mut self, store: &FrameStore, group: &str, name: &str) -> MinimalResult<()> {
        let frame = self.pixels()?;
        store.put(group, name, &frame)
    }

    /// Frame holding the pixels stored as `group/name`.
    pub fn load_from(store: &FrameStore, group: &str, name: &str) -> MinimalResult<Self> {
        let stored = store.get(group, name)?;
        let mut frame = Self::with_settings(
            stored.width,
            stored.height,
            RenderSettings::default().with_background(None),
        )?;
        frame.surface.draw_image(&frame_image(&stored)?)?;
        Ok(frame)
    }
}

/// One entry of a canvas order.
#[derive(Debug, Clone)]
pub enum Layer {
    /// Pre-rendered pixels.
    Frame(FrameRGBA),
    /// Live item redrawn every frame.
    Object(Drawable),
}

impl From<Drawable> for Layer {
    fn from(item: Drawable) -> Self {
        Layer::Object(item)
    }
}

impl From<FrameRGBA> for Layer {
    fn from(frame: FrameRGBA) -> Self {
        Layer::Frame(frame)
    }
}

/// Animated display: an [`Order`] of layers rendered once per tick.
///
/// A canvas holding only frame layers plays them back in a cycle. Otherwise every layer
/// is drawn in order on each tick; frame layers composite as full images, and the
/// background is repainted only while no frame layer was ever added.
#[derive(Debug)]
pub struct Canvas {
    surface: CpuSurface,
    order: Order<Layer>,
    fps: u32,
    refresh: bool,
    cursor: Cursor,
    last: Option<FrameRGBA>,
}

impl Canvas {
    /// Canvas of `width x height` pixels over `background`.
    pub fn new(width: u32, height: u32, background: Color, fps: u32) -> MinimalResult<Self> {
        if fps == 0 {
            return Err(MinimalError::validation("fps must be > 0"));
        }
        Ok(Self {
            surface: CpuSurface::new(
                width,
                height,
                RenderSettings::default().with_background(Some(background)),
            )?,
            order: Order::new(),
            fps,
            refresh: true,
            cursor: Cursor::new(Traversal::Cycle),
            last: None,
        })
    }

    /// Canvas sized and colored from scene settings.
    pub fn from_settings(settings: &SceneSettings) -> MinimalResult<Self> {
        Self::new(
            settings.width,
            settings.height,
            settings.background,
            settings.fps,
        )
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Delay between ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps))
    }

    /// `false` once a frame layer was added.
    pub fn refreshes(&self) -> bool {
        self.refresh
    }

    /// Underlying surface, for font registration.
    pub fn surface_mut(&mut self) -> &mut CpuSurface {
        &mut self.surface
    }

    /// Layers in drawing order.
    pub fn order(&self) -> &Order<Layer> {
        &self.order
    }

    /// Mutable layer at `index`, for driving items between ticks.
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.order.get_mut(index)
    }

    /// Append a live item.
    pub fn add(&mut self, item: impl Into<Drawable>) {
        self.order.push(Layer::Object(item.into()));
    }

    /// Append a pre-rendered frame.
    pub fn add_frame(&mut self, frame: FrameRGBA) -> MinimalResult<()> {
        let layer = self.check_layer(frame.into())?;
        self.order.push(layer);
        Ok(())
    }

    /// Insert a layer before `index`.
    pub fn insert(&mut self, index: usize, layer: Layer) -> MinimalResult<()> {
        let layer = self.check_layer(layer)?;
        self.order.insert(index, layer)
    }

    /// Append layers, or insert `layers[k]` at `indices[k]` in sequence when given.
    pub fn add_many(&mut self, layers: Vec<Layer>, indices: Option<&[usize]>) -> MinimalResult<()> {
        let layers = layers
            .into_iter()
            .map(|l| self.check_layer(l))
            .collect::<MinimalResult<Vec<_>>>()?;
        match indices {
            Some(indices) => self.order.extend_at(layers, indices),
            None => {
                self.order.extend(layers);
                Ok(())
            }
        }
    }

    fn check_layer(&mut self, layer: Layer) -> MinimalResult<Layer> {
        if let Layer::Frame(frame) = &layer {
            if (frame.width, frame.height) != (self.width(), self.height()) {
                return Err(MinimalError::validation(format!(
                    "frame of {}x{} does not fit a {}x{} canvas",
                    frame.width,
                    frame.height,
                    self.width(),
                    self.height()
                )));
            }
            self.refresh = false;
        }
        Ok(layer)
    }

    fn frames_only(&self) -> bool {
        !self.order.is_empty() && self.order.iter().all(|l| matches!(l, Layer::Frame(_)))
    }

    /// Start frame playback from the first frame again.
    pub fn restart(&mut self) {
        self.cursor.rewind();
    }

    /// Produce the next tick.
    #[tracing::instrument(skip_all, fields(layers = self.order.len()))]
    pub fn render_next(&mut self) -> MinimalResult<FrameRGBA> {
        if self.frames_only() {
            let frame = self
                .cursor
                .next_index(self.order.len())
                .and_then(|i| self.order.get(i));
            if let Some(Layer::Frame(frame)) = frame {
                return Ok(frame.clone());
            }
        }

        self.surface.reset();
        if !self.refresh
            && let Some(prev) = &self.last
        {
            self.surface.draw_image(&frame_image(prev)?)?;
        }
        for layer in self.order.iter_mut() {
            match layer {
                Layer::Frame(frame) => self.surface.draw_image(&frame_image(frame)?)?,
                Layer::Object(item) => item.draw(&mut self.surface)?,
            }
        }
        let frame = self.surface.render()?;
        self.last = Some(frame.clone());
        Ok(frame)
    }

    /// Render `count` ticks into `sink`.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_range(&mut self, sink: &mut dyn FrameSink, count: u64) -> MinimalResult<()> {
        sink.begin(SinkConfig {
            width: self.width(),
            height: self.height(),
            fps: self.fps,
        })?;
        for idx in 0..count {
            let frame = self.render_next()?;
            sink.push_frame(idx, &frame)?;
        }
        sink.end()
    }

    /// Save a single tick as a PNG; canvases holding frame layers cannot be stilled.
    pub fn to_png(&mut self, path: impl AsRef<Path>) -> MinimalResult<()> {
        if self.order.iter().any(|l| matches!(l, Layer::Frame(_))) {
            return Err(MinimalError::type_error(
                "cannot save multiple frames to a single image; save each Frame instead",
            ));
        }
        let frame = self.render_next()?;
        write_png(path.as_ref(), &frame)
    }
}

fn frame_image(frame: &FrameRGBA) -> MinimalResult<Image> {
    Image::from_rgba(frame.width, frame.height, frame.to_straight_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/display/canvas.rs"]
mod tests;
