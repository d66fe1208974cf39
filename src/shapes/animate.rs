//! Keyframe tracks for shape fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::MinimalError;
use crate::render::surface::{FontSlant, FontWeight};

/// A shape field that can be driven by a [`Track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Position x.
    X,
    /// Position y.
    Y,
    /// Fill color.
    FillColor,
    /// Fill alpha.
    FillAlpha,
    /// Outline color.
    OutlineColor,
    /// Outline alpha.
    OutlineAlpha,
    /// Outline width.
    OutlineWidth,
    /// Horizontal scale.
    ScaleX,
    /// Vertical scale.
    ScaleY,
    /// Circle radius.
    Radius,
    /// Circle start angle.
    Angle1,
    /// Circle end angle.
    Angle2,
    /// Rectangle width.
    Width,
    /// Rectangle height.
    Height,
    /// Text content.
    Text,
    /// Text size.
    FontSize,
    /// Text family.
    Font,
    /// Text slant.
    FontSlant,
    /// Text weight.
    FontWeight,
}

/// Fields every shape accepts.
pub const BASE_FIELDS: [Field; 9] = [
    Field::X,
    Field::Y,
    Field::FillColor,
    Field::FillAlpha,
    Field::OutlineColor,
    Field::OutlineAlpha,
    Field::OutlineWidth,
    Field::ScaleX,
    Field::ScaleY,
];

impl Field {
    /// Every field.
    pub const ALL: [Field; 19] = [
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
        Field::Width,
        Field::Height,
        Field::Text,
        Field::FontSize,
        Field::Font,
        Field::FontSlant,
        Field::FontWeight,
    ];

    /// Snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::FillColor => "fill_color",
            Field::FillAlpha => "fill_alpha",
            Field::OutlineColor => "outline_color",
            Field::OutlineAlpha => "outline_alpha",
            Field::OutlineWidth => "outline_width",
            Field::ScaleX => "scale_x",
            Field::ScaleY => "scale_y",
            Field::Radius => "radius",
            Field::Angle1 => "angle1",
            Field::Angle2 => "angle2",
            Field::Width => "width",
            Field::Height => "height",
            Field::Text => "text",
            Field::FontSize => "font_size",
            Field::Font => "font",
            Field::FontSlant => "font_slant",
            Field::FontWeight => "font_weight",
        }
    }

    /// Check that `value` has the type this field stores.
    pub fn check(self, value: &FieldValue) -> Result<(), MinimalError> {
        let ok = match self {
            Field::FillColor | Field::OutlineColor => matches!(value, FieldValue::Color(_)),
            Field::Text | Field::Font => matches!(value, FieldValue::Text(_)),
            Field::FontSlant => match value {
                FieldValue::Text(s) => parse_slant(s).is_some(),
                _ => false,
            },
            Field::FontWeight => match value {
                FieldValue::Text(s) => parse_weight(s).is_some(),
                _ => false,
            },
            _ => matches!(value, FieldValue::Number(_)),
        };
        if ok {
            Ok(())
        } else {
            Err(MinimalError::validation(format!(
                "field '{}' cannot take {value}",
                self.name()
            )))
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = MinimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
                MinimalError::invalid_attribute(s, &names)
            })
    }
}

pub(crate) fn parse_slant(s: &str) -> Option<FontSlant> {
    match s.to_ascii_lowercase().as_str() {
        "normal" => Some(FontSlant::Normal),
        "italic" => Some(FontSlant::Italic),
        "oblique" => Some(FontSlant::Oblique),
        _ => None,
    }
}

pub(crate) fn parse_weight(s: &str) -> Option<FontWeight> {
    match s.to_ascii_lowercase().as_str() {
        "normal" => Some(FontWeight::Normal),
        "bold" => Some(FontWeight::Bold),
        _ => None,
    }
}

/// A keyframe value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric fields.
    Number(f64),
    /// Color fields.
    Color(Color),
    /// Text, family, slant and weight fields.
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "number {v}"),
            FieldValue::Color(c) => write!(f, "color ({}, {}, {})", c.r, c.g, c.b),
            FieldValue::Text(s) => write!(f, "text '{s}'"),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<Color> for FieldValue {
    fn from(c: Color) -> Self {
        FieldValue::Color(c)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_owned())
    }
}

/// What a track does after its last keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtEnd {
    /// Jump back to the first keyframe.
    #[default]
    Restart,
    /// Walk back toward the first keyframe, then forward again.
    Reverse,
    /// Hold the last keyframe.
    Stop,
}

impl AtEnd {
    /// Accepted names.
    pub const NAMES: [&'static str; 3] = ["restart", "reverse", "stop"];
}

impl FromStr for AtEnd {
    type Err = MinimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restart" => Ok(AtEnd::Restart),
            "reverse" => Ok(AtEnd::Reverse),
            "stop" => Ok(AtEnd::Stop),
            other => Err(MinimalError::invalid_argument(other, &Self::NAMES)),
        }
    }
}

/// Endless keyframe sequence for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    values: Vec<FieldValue>,
    at_end: AtEnd,
    step: usize,
}

impl Track {
    /// Track over `values`; callers guarantee at least one value.
    pub(crate) fn new(values: Vec<FieldValue>, at_end: AtEnd) -> Self {
        Self {
            values,
            at_end,
            step: 0,
        }
    }

    fn index(&self, step: usize) -> usize {
        let n = self.values.len();
        match self.at_end {
            AtEnd::Restart => step % n,
            AtEnd::Stop => step.min(n - 1),
            AtEnd::Reverse => {
                if n == 1 {
                    return 0;
                }
                let cycle = 2 * (n - 1);
                let pos = step % cycle;
                if pos < n { pos } else { cycle - pos }
            }
        }
    }

    /// Ending mode.
    pub fn at_end(&self) -> AtEnd {
        self.at_end
    }
}

impl Iterator for Track {
    type Item = FieldValue;

    fn next(&mut self) -> Option<FieldValue> {
        let value = self.values.get(self.index(self.step)).cloned();
        self.step = self.step.saturating_add(1);
        value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/animate.rs"]
mod tests;
