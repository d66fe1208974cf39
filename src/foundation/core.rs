use crate::foundation::error::{MinimalError, MinimalResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by [`crate::CpuSurface`] are premultiplied alpha; the flag makes this
/// explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Wrap raw RGBA8 bytes, checking the buffer length against the dimensions.
    pub fn from_raw(
        width: u32,
        height: u32,
        data: Vec<u8>,
        premultiplied: bool,
    ) -> MinimalResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(MinimalError::validation(format!(
                "frame buffer holds {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            premultiplied,
        })
    }

    /// Pixel at (x, y) as `[r, g, b, a]`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy of the pixel data with premultiplication undone.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}
