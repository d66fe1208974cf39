use serde::{Deserialize, Serialize};

use crate::foundation::error::{MinimalError, MinimalResult};

/// Straight (non-premultiplied) RGB color with channels in `[0, 1]`.
///
/// Alpha is carried separately by every API that paints, the way stroke and fill calls take
/// `(color, alpha)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Build a color from RGB channels in `[0, 1]`.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build a gray with the given HSL lightness.
    pub fn from_luminance(l: f64) -> Self {
        Self::from_hsl(0.0, 0.0, l)
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(s: &str) -> MinimalResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let expand = |c: char| -> MinimalResult<f64> {
            let v = c
                .to_digit(16)
                .ok_or_else(|| MinimalError::validation(format!("invalid hex color '{s}'")))?;
            Ok(f64::from(v * 17) / 255.0)
        };
        match hex.len() {
            3 => {
                let mut it = hex.chars();
                let (Some(r), Some(g), Some(b)) = (it.next(), it.next(), it.next()) else {
                    return Err(MinimalError::validation(format!("invalid hex color '{s}'")));
                };
                Ok(Self::rgb(expand(r)?, expand(g)?, expand(b)?))
            }
            6 => {
                let channel = |i: usize| -> MinimalResult<f64> {
                    let v = hex
                        .get(i..i + 2)
                        .and_then(|h| u8::from_str_radix(h, 16).ok())
                        .ok_or_else(|| {
                            MinimalError::validation(format!("invalid hex color '{s}'"))
                        })?;
                    Ok(f64::from(v) / 255.0)
                };
                Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => Err(MinimalError::validation(format!(
                "hex color must be #rgb or #rrggbb, got '{s}'"
            ))),
        }
    }

    /// Build a color from hue (turns, `[0, 1)`), saturation and lightness.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::rgb(l, l, l);
        }
        let h = h.rem_euclid(1.0);
        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;
        Self::rgb(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    }

    /// Hue (turns), saturation and lightness of this color.
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let (r, g, b) = (
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        );
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return (0.0, 0.0, l);
        }
        let s = if l < 0.5 {
            d / (max + min)
        } else {
            d / (2.0 - max - min)
        };
        let h = if max == r {
            ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s, l)
    }

    /// `steps` colors walking from `self` to `target` linearly in HSL space.
    ///
    /// The first color is `self`, the last is `target`; `steps == 1` yields only `self`.
    pub fn range_to(self, target: Color, steps: usize) -> Vec<Color> {
        let (h0, s0, l0) = self.to_hsl();
        let (h1, s1, l1) = target.to_hsl();
        match steps {
            0 => Vec::new(),
            1 => vec![self],
            n => (0..n)
                .map(|i| {
                    if i == n - 1 {
                        return target;
                    }
                    let t = i as f64 / (n - 1) as f64;
                    Self::from_hsl(h0 + (h1 - h0) * t, s0 + (s1 - s0) * t, l0 + (l1 - l0) * t)
                })
                .collect(),
        }
    }

    /// Straight RGBA8 with the given alpha.
    pub fn to_rgba8(self, alpha: f64) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(alpha)]
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbObj { r: f64, g: f64, b: f64 },
            HslObj { h: f64, s: f64, l: f64 },
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbObj { r, g, b } => Ok(Self::rgb(r, g, b)),
            Repr::HslObj { h, s, l } => Ok(Self::from_hsl(h / 360.0, s, l)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
