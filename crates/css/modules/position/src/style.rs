//! Inline style produced by a sticky element.

use css_values_units::format_number;
use serde::Serialize;

/// Transform used to promote a pinned element to its own compositing layer.
pub const HARDWARE_ACCELERATION: &str = "translateZ(0)";

/// The `position` values a sticky element switches between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Static,
    Fixed,
}

impl Position {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Fixed => "fixed",
        }
    }
}

/// Style mapping handed to the render function; unset fields are absent from the output.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl StickyStyle {
    /// Pinned style at `top`, keeping the placeholder's horizontal box.
    #[must_use]
    pub const fn fixed(top: f64, left: f64, width: f64) -> Self {
        Self {
            position: Some(Position::Fixed),
            top: Some(top),
            left: Some(left),
            width: Some(width),
            transform: None,
        }
    }

    /// Only the hardware-acceleration transform.
    #[must_use]
    pub fn accelerated() -> Self {
        Self {
            transform: Some(HARDWARE_ACCELERATION.to_owned()),
            ..Self::default()
        }
    }

    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The position in effect, `static` when none is set.
    pub fn effective_position(&self) -> Position {
        self.position.unwrap_or_default()
    }

    /// Render as inline CSS declarations, e.g. `position: fixed; top: 0px`.
    pub fn to_css(&self) -> String {
        let mut declarations = Vec::new();
        if let Some(position) = self.position {
            declarations.push(format!("position: {}", position.as_str()));
        }
        for (name, value) in [("top", self.top), ("left", self.left), ("width", self.width)] {
            if let Some(px) = value {
                declarations.push(format!("{name}: {}px", format_number(px)));
            }
        }
        if let Some(transform) = &self.transform {
            declarations.push(format!("transform: {transform}"));
        }
        declarations.join("; ")
    }
}
