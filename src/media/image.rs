use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{MinimalError, MinimalResult};

/// Mirror direction for [`Image::mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Swap top and bottom rows.
    Vertical,
    /// Swap left and right columns.
    Horizontal,
    /// Both at once.
    Both,
}

/// Part of an image that lands inside a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Left column in the image.
    pub src_x: u32,
    /// Top row in the image.
    pub src_y: u32,
    /// Left column on the canvas.
    pub dst_x: u32,
    /// Top row on the canvas.
    pub dst_y: u32,
    /// Visible width.
    pub width: u32,
    /// Visible height.
    pub height: u32,
}

/// Straight-alpha RGBA8 raster placed with its top-left corner at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    position: Point,
}

impl Image {
    /// Wrap raw straight RGBA8 rows.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> MinimalResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(MinimalError::validation(format!(
                "image of {width}x{height} needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
            position: Point::ORIGIN,
        })
    }

    /// Decode any format the `image` crate understands; the result is RGBA.
    pub fn decode(bytes: &[u8]) -> MinimalResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_buffer(dyn_img.to_rgba8()))
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> MinimalResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Self::decode(&bytes)
    }

    fn from_buffer(buf: image::RgbaImage) -> Self {
        let (width, height) = buf.dimensions();
        Self {
            width,
            height,
            rgba: buf.into_raw(),
            position: Point::ORIGIN,
        }
    }

    fn to_buffer(&self) -> MinimalResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| MinimalError::validation("image buffer size mismatch"))
    }

    /// Same image placed at `position`.
    pub fn at(mut self, position: impl Into<Point>) -> Self {
        self.position = position.into();
        self
    }

    /// Move the image.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight RGBA8 rows.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Pixel at `(x, y)`, if inside.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ])
    }

    /// Flip in place.
    pub fn mirror(&mut self, axis: FlipAxis) -> MinimalResult<()> {
        let mut buf = self.to_buffer()?;
        if matches!(axis, FlipAxis::Vertical | FlipAxis::Both) {
            image::imageops::flip_vertical_in_place(&mut buf);
        }
        if matches!(axis, FlipAxis::Horizontal | FlipAxis::Both) {
            image::imageops::flip_horizontal_in_place(&mut buf);
        }
        self.rgba = buf.into_raw();
        Ok(())
    }

    /// Resample to `width x height` with bilinear filtering.
    pub fn resize(&mut self, width: u32, height: u32) -> MinimalResult<()> {
        if width == 0 || height == 0 {
            return Err(MinimalError::validation("image size must be non-zero"));
        }
        let buf = self.to_buffer()?;
        let resized =
            image::imageops::resize(&buf, width, height, image::imageops::FilterType::Triangle);
        let position = self.position;
        *self = Self::from_buffer(resized).at(position);
        Ok(())
    }

    /// Rotate counterclockwise by `degrees` about the image center, keeping the size.
    ///
    /// Pixels are resampled bilinearly; anything mapped from outside the source is
    /// transparent.
    pub fn rotate(&mut self, degrees: f64) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (cx, cy) = (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0);
        let mut out = Vec::with_capacity(self.rgba.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let (dx, dy) = (f64::from(x) - cx, f64::from(y) - cy);
                let sx = cos * dx - sin * dy + cx;
                let sy = sin * dx + cos * dy + cy;
                out.extend_from_slice(&self.sample_bilinear(sx, sy));
            }
        }
        self.rgba = out;
    }

    fn texel(&self, x: i64, y: i64) -> [f64; 4] {
        if x < 0 || y < 0 {
            return [0.0; 4];
        }
        match self.pixel(x as u32, y as u32) {
            Some(p) => p.map(f64::from),
            None => [0.0; 4],
        }
    }

    fn sample_bilinear(&self, sx: f64, sy: f64) -> [u8; 4] {
        let (x0, y0) = (sx.floor(), sy.floor());
        let (fx, fy) = (sx - x0, sy - y0);
        let (x0, y0) = (x0 as i64, y0 as i64);
        let p00 = self.texel(x0, y0);
        let p10 = self.texel(x0 + 1, y0);
        let p01 = self.texel(x0, y0 + 1);
        let p11 = self.texel(x0 + 1, y0 + 1);
        std::array::from_fn(|c| {
            let top = p00[c] * (1.0 - fx) + p10[c] * fx;
            let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
            (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
        })
    }

    /// Visible part of the image on a `canvas_width x canvas_height` canvas, using the
    /// position floored to whole pixels; `None` when nothing overlaps.
    pub fn visible_region(&self, canvas_width: u32, canvas_height: u32) -> Option<CropRegion> {
        let (px, py) = (self.position.x.floor() as i64, self.position.y.floor() as i64);
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let (cw, ch) = (i64::from(canvas_width), i64::from(canvas_height));

        let (cx1, cx2) = (px.max(0), cw.min(px + w));
        let (cy1, cy2) = (py.max(0), ch.min(py + h));
        if cx1 >= cx2 || cy1 >= cy2 {
            return None;
        }
        Some(CropRegion {
            src_x: (cx1 - px) as u32,
            src_y: (cy1 - py) as u32,
            dst_x: cx1 as u32,
            dst_y: cy1 as u32,
            width: (cx2 - cx1) as u32,
            height: (cy2 - cy1) as u32,
        })
    }

    /// Premultiplied RGBA8 rows of `region`.
    pub fn premultiplied_region(&self, region: &CropRegion) -> Vec<u8> {
        let mut out = Vec::with_capacity(region.width as usize * region.height as usize * 4);
        let stride = self.width as usize * 4;
        for row in region.src_y..region.src_y + region.height {
            let start = row as usize * stride + region.src_x as usize * 4;
            out.extend_from_slice(&self.rgba[start..start + region.width as usize * 4]);
        }
        premultiply_rgba8_in_place(&mut out);
        out
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/image.rs"]
mod tests;
