use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Point, Vec2};

/// One color stop of a gradient; `offset` is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the gradient.
    pub offset: f64,
    /// Stop color.
    pub color: Color,
    /// Stop alpha.
    pub alpha: f64,
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GradientKind {
    /// Linear gradient between two points.
    Linear {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Two-circle radial gradient.
    Radial {
        /// Start circle center.
        c1: Point,
        /// Start circle radius.
        r1: f64,
        /// End circle center.
        c2: Point,
        /// End circle radius.
        r2: f64,
    },
}

/// Gradient paint with ordered color stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Geometry.
    pub kind: GradientKind,
    /// Stops sorted by offset.
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    /// Gradient with a first stop at offset 0.
    pub fn new(kind: GradientKind, color: Color, alpha: f64) -> Self {
        Self {
            kind,
            stops: vec![ColorStop {
                offset: 0.0,
                color,
                alpha,
            }],
        }
    }

    /// Add a stop, keeping stops ordered by offset.
    pub fn add_stop(&mut self, offset: f64, color: Color, alpha: f64) {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(
            at,
            ColorStop {
                offset,
                color,
                alpha,
            },
        );
    }

    /// The same gradient moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Gradient {
        let kind = match self.kind {
            GradientKind::Linear { from, to } => GradientKind::Linear {
                from: from + delta,
                to: to + delta,
            },
            GradientKind::Radial { c1, r1, c2, r2 } => GradientKind::Radial {
                c1: c1 + delta,
                r1,
                c2: c2 + delta,
                r2,
            },
        };
        Gradient {
            kind,
            stops: self.stops.clone(),
        }
    }
}

/// Fill source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Solid color with alpha.
    Solid {
        /// Color.
        color: Color,
        /// Alpha in `[0, 1]`.
        alpha: f64,
    },
    /// Gradient in surface coordinates.
    Gradient(Gradient),
}

impl Paint {
    /// Solid paint.
    pub fn solid(color: Color, alpha: f64) -> Self {
        Self::Solid { color, alpha }
    }
}
