//! Generative polyline with noise, banded gradients and a reveal/erase animation.

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::{MinimalError, MinimalResult};
use crate::foundation::math::{Rng64, linspace};
use crate::generative::noise::SimplexNoise;
use crate::render::surface::DrawSurface;

/// How point pairs are interpreted when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CoordSystem {
    /// Points are `(x, y)`.
    #[default]
    Cartesian,
    /// Points are `(radius, angle)` around `offset`.
    Polar {
        /// Pole position.
        offset: Point,
    },
}

impl CoordSystem {
    fn map(self, p: Point) -> Point {
        match self {
            CoordSystem::Cartesian => p,
            CoordSystem::Polar { offset } => Point::new(
                p.x * p.y.cos() + offset.x,
                p.x * p.y.sin() + offset.y,
            ),
        }
    }
}

/// Per-axis noise amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseScale {
    /// Amplitude along x.
    pub x: f64,
    /// Amplitude along y.
    pub y: f64,
}

impl NoiseScale {
    /// Same amplitude on both axes.
    pub fn uniform(scale: f64) -> Self {
        Self { x: scale, y: scale }
    }
}

/// Where the reveal cursor starts when the animation is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatStart {
    /// Start fully hidden.
    #[default]
    Zero,
    /// Start at a uniformly drawn index in `[0, div)`.
    Random(u64),
}

/// What one cursor step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// `lead` moved forward.
    Revealing,
    /// `follow` moved forward.
    Erasing,
    /// The cycle completed and both cursors are back at 0.
    Wrapped,
}

/// Index range `[start, end)` of segment start points drawn with one color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    /// First point index.
    pub start: usize,
    /// One past the last segment start index.
    pub end: usize,
    /// Band color.
    pub color: Color,
    /// Band alpha.
    pub alpha: f64,
}

/// A polyline of `div` interpolated points.
#[derive(Debug, Clone, PartialEq)]
pub struct GenLine {
    points: Vec<Point>,
    div: usize,
    bands: Vec<ColorBand>,
    coords: CoordSystem,
    width: f64,
    repeat: bool,
    follow: usize,
    lead: usize,
}

impl GenLine {
    /// `div` evenly spaced points from `start` to `stop`.
    pub fn new(start: impl Into<Point>, stop: impl Into<Point>, div: usize) -> MinimalResult<Self> {
        let (start, stop) = (start.into(), stop.into());
        Self::check_div(div)?;
        Ok(Self::from_points(segment(start, stop, div), div))
    }

    /// Points along a waypoint chain, `div / (n - 1)` per consecutive pair.
    ///
    /// The count per pair truncates, so remainder points are dropped; shared waypoints
    /// appear once at the end of one pair and again at the start of the next.
    pub fn through(waypoints: &[Point], div: usize) -> MinimalResult<Self> {
        Self::check_div(div)?;
        if waypoints.len() < 2 {
            return Err(MinimalError::validation(format!(
                "a line needs at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        let per = div / (waypoints.len() - 1);
        let points = waypoints
            .windows(2)
            .flat_map(|w| segment(w[0], w[1], per))
            .collect();
        Ok(Self::from_points(points, div))
    }

    fn check_div(div: usize) -> MinimalResult<()> {
        if div < 2 {
            return Err(MinimalError::validation(format!(
                "line divisions must be at least 2, got {div}"
            )));
        }
        Ok(())
    }

    fn from_points(points: Vec<Point>, div: usize) -> Self {
        Self {
            points,
            div,
            bands: vec![ColorBand {
                start: 0,
                end: div,
                color: Color::BLACK,
                alpha: 1.0,
            }],
            coords: CoordSystem::Cartesian,
            width: 2.0,
            repeat: false,
            follow: 0,
            lead: div,
        }
    }

    /// Draw the whole line with one color.
    pub fn with_color(mut self, color: Color, alpha: f64) -> Self {
        self.bands = vec![ColorBand {
            start: 0,
            end: self.div,
            color,
            alpha,
        }];
        self
    }

    /// Stroke width in pixels.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Coordinate interpretation used when drawing.
    pub fn with_coords(mut self, coords: CoordSystem) -> Self {
        self.coords = coords;
        self
    }

    /// Points in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Division count.
    pub fn div(&self) -> usize {
        self.div
    }

    /// Color bands in order.
    pub fn bands(&self) -> &[ColorBand] {
        &self.bands
    }

    /// Stroke width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Coordinate system.
    pub fn coords(&self) -> CoordSystem {
        self.coords
    }

    /// `(follow, lead)` reveal cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.follow, self.lead)
    }

    /// Whether the reveal animation is armed.
    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    /// Displace points with the default noise field; see [`GenLine::noise_with`].
    pub fn noise(&mut self, scale: NoiseScale, z: f64) {
        self.noise_with(&SimplexNoise::default(), scale, z);
    }

    /// Displace every point by sampled noise, one point at a time.
    ///
    /// The y lookup uses the x value already displaced for the same point.
    pub fn noise_with(&mut self, field: &SimplexNoise, scale: NoiseScale, z: f64) {
        let div = self.div as f64;
        for p in &mut self.points {
            p.x += scale.x * field.noise3(p.x / div, p.y / div, z);
            p.y += scale.y * field.noise3(p.x / div, p.y / div, z);
        }
    }

    /// Replace the bands with `steps` equal bands fading from the current last color to
    /// `target`, with alpha running across `alpha`.
    pub fn gradient(&mut self, target: Color, steps: usize, alpha: (f64, f64)) -> MinimalResult<()> {
        if steps == 0 {
            return Err(MinimalError::validation("gradient needs at least 1 step"));
        }
        let from = self.bands.last().map_or(Color::BLACK, |b| b.color);
        let colors = from.range_to(target, steps);
        let alphas = linspace(alpha.0, alpha.1, steps);
        let div = self.div;
        self.bands = colors
            .into_iter()
            .zip(alphas)
            .enumerate()
            .map(|(k, (color, alpha))| ColorBand {
                start: k * div / steps,
                end: (k + 1) * div / steps,
                color,
                alpha,
            })
            .collect();
        tracing::debug!(steps, div, "line gradient");
        Ok(())
    }

    /// Arm the reveal/erase animation; `follow` restarts at 0.
    pub fn repeat(&mut self, start: RepeatStart) {
        self.repeat = true;
        self.follow = 0;
        self.lead = match start {
            RepeatStart::Zero => 0,
            RepeatStart::Random(seed) => Rng64::new(seed).below(self.div),
        };
    }

    /// Move the cursor one step: reveal until `lead == div`, then erase until
    /// `follow == div`, at which point both return to 0.
    pub fn advance(&mut self) -> RevealPhase {
        if self.lead < self.div {
            self.lead += 1;
            return RevealPhase::Revealing;
        }
        if self.follow < self.div {
            self.follow += 1;
            if self.follow < self.div {
                return RevealPhase::Erasing;
            }
        }
        self.follow = 0;
        self.lead = 0;
        RevealPhase::Wrapped
    }

    /// Append `other`, sharing this line's last point with `other`'s first.
    pub fn couple(&mut self, other: &GenLine) {
        let prior = self.div;
        self.points.truncate(self.points.len().saturating_sub(1));
        self.points.extend_from_slice(&other.points);
        self.div += other.div;
        let (color, alpha) = other
            .bands
            .first()
            .map_or((Color::BLACK, 1.0), |b| (b.color, b.alpha));
        self.bands.push(ColorBand {
            start: prior,
            end: prior + other.div,
            color,
            alpha,
        });
        self.lead += other.div;
    }

    /// Stroke every visible segment band by band, then step the animation if armed.
    ///
    /// A band covers points `[max(start, follow), min(end + 1, lead, len))`; the extra point
    /// joins it to the next band. Returns the number of strokes.
    pub fn draw(&mut self, surface: &mut dyn DrawSurface) -> usize {
        let mut strokes = 0;
        for band in &self.bands {
            let lo = band.start.max(self.follow);
            let hi = (band.end + 1).min(self.lead).min(self.points.len());
            if hi < lo + 2 {
                continue;
            }
            for pair in self.points[lo..hi].windows(2) {
                surface.move_to(self.coords.map(pair[0]));
                surface.line_to(self.coords.map(pair[1]));
                surface.stroke(band.color, band.alpha, self.width);
                strokes += 1;
            }
        }
        if self.repeat {
            self.advance();
        }
        strokes
    }
}

fn segment(a: Point, b: Point, n: usize) -> Vec<Point> {
    linspace(a.x, b.x, n)
        .into_iter()
        .zip(linspace(a.y, b.y, n))
        .map(|(x, y)| Point::new(x, y))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/generative/line.rs"]
mod tests;
