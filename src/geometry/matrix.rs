//! Homogeneous 4x4 transforms.
//!
//! Points are row vectors: a transform maps `[x y z 1]` to `[x y z 1] · M`, so translation
//! lives in the last row and `a.mul(&b)` applies `a` first, then `b`.
//!
//! Rotation convention: a positive angle rotates counterclockwise when looking from the
//! positive end of the axis toward the origin (right-handed), identically for X, Y and Z.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MinimalError, MinimalResult};
use crate::geometry::vec3::Vec3;

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Keywords accepted by [`Axis::from_str`].
    pub const NAMES: [&'static str; 3] = ["x", "y", "z"];
}

impl FromStr for Axis {
    type Err = MinimalError;

    fn from_str(s: &str) -> MinimalResult<Self> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            other => Err(MinimalError::invalid_argument(other, &Self::NAMES)),
        }
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Near plane distance.
    pub near: f64,
    /// Far plane distance.
    pub far: f64,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Height divided by width.
    pub aspect: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 1000.0,
            fov_deg: 90.0,
            aspect: 1.0,
        }
    }
}

impl Projection {
    /// Default projection with the aspect ratio of a `width` x `height` target.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self::default().with_aspect(f64::from(height) / f64::from(width.max(1)))
    }

    /// Return the projection with a different vertical field of view.
    pub fn with_fov_deg(mut self, fov_deg: f64) -> Self {
        self.fov_deg = fov_deg;
        self
    }

    /// Return the projection with a different aspect ratio (height / width).
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Return the projection with different clip plane distances.
    pub fn with_planes(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Build the projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::projection(self)
    }
}

/// A homogeneous transform in row-vector form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4(pub [[f64; 4]; 4]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// The identity transform.
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Rotation by `theta` radians about `axis`.
    pub fn rotation(axis: Axis, theta: f64) -> Mat4 {
        let (s, c) = theta.sin_cos();
        match axis {
            Axis::X => Mat4([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Y => Mat4([
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Z => Mat4([
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }

    /// Pure translation.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [dx, dy, dz, 1.0],
        ])
    }

    /// Perspective projection; the source z ends up in w.
    pub fn projection(p: &Projection) -> Mat4 {
        let f = 1.0 / (p.fov_deg.to_radians() * 0.5).tan();
        let q = p.far / (p.far - p.near);
        Mat4([
            [p.aspect * f, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, q, 1.0],
            [0.0, 0.0, -p.near * q, 0.0],
        ])
    }

    /// `self` followed by `other`.
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let (a, b) = (&self.0, &other.0);
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        Mat4(out)
    }

    /// Homogeneous product `[x y z 1] · M` without the perspective divide.
    pub fn transform_homogeneous(&self, p: Vec3) -> [f64; 4] {
        let m = &self.0;
        let v = [p.x, p.y, p.z, 1.0];
        let mut out = [0.0; 4];
        for (j, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| v[k] * m[k][j]).sum();
        }
        out
    }

    /// Transform a point and divide by w.
    ///
    /// When w is exactly zero the divide is skipped and the undivided x, y, z are returned.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, w] = self.transform_homogeneous(p);
        if w == 0.0 {
            return Vec3::new(x, y, z);
        }
        Vec3::new(x / w, y / w, z / w)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/matrix.rs"]
mod tests;
