//! Scene configuration read from JSON.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{MinimalError, MinimalResult};
use crate::geometry::matrix::Projection;
use crate::geometry::vec3::Vec3;
use crate::pipeline::frame::{FlatShading, Viewport};

/// Canvas, camera and lighting parameters for a scene.
///
/// Every field is optional in JSON; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Background color.
    pub background: Color,
    /// Perspective projection.
    pub projection: Projection,
    /// Lit/unlit shades.
    pub shading: FlatShading,
    /// Camera position for culling.
    pub camera: Vec3,
    /// Light direction.
    pub light: Vec3,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            fps: 60,
            background: Color::WHITE,
            projection: Projection::for_viewport(800, 800),
            shading: FlatShading::default(),
            camera: Vec3::ZERO,
            light: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

impl SceneSettings {
    /// Parse settings from a JSON document.
    pub fn from_json_str(src: &str) -> MinimalResult<Self> {
        let settings: Self = serde_json::from_str(src)
            .map_err(|e| MinimalError::serde(format!("scene settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> MinimalResult<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read scene settings '{}'", path.display()))?;
        Self::from_json_str(&src)
    }

    /// Reject sizes and rates no canvas can use.
    pub fn validate(&self) -> MinimalResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MinimalError::validation("scene width/height must be > 0"));
        }
        if self.fps == 0 {
            return Err(MinimalError::validation("scene fps must be > 0"));
        }
        if !(self.projection.near > 0.0 && self.projection.far > self.projection.near) {
            return Err(MinimalError::validation(
                "projection planes must satisfy 0 < near < far",
            ));
        }
        Ok(())
    }

    /// Viewport covering the whole canvas.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
