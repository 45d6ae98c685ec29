//! Sticky element configuration.

use serde::Serialize;

/// Immutable settings for one [`crate::Sticky`], fixed at mount time.
///
/// Every field defaults to zero / `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyConfig {
    /// Distance past the container's top edge before the element sticks.
    /// Positive values attach later, negative values earlier.
    pub top_offset: f64,
    /// Space kept free below the element as the container's bottom arrives.
    pub bottom_offset: f64,
    /// Track the container's own scrollport instead of the window.
    pub relative: bool,
    /// Omit `transform: translateZ(0)` from the style.
    pub disable_hardware_acceleration: bool,
    /// Leave the placeholder's bottom padding alone.
    pub disable_compensation: bool,
}

impl StickyConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top_offset: 0.0,
            bottom_offset: 0.0,
            relative: false,
            disable_hardware_acceleration: false,
            disable_compensation: false,
        }
    }

    #[must_use]
    pub const fn with_top_offset(mut self, top_offset: f64) -> Self {
        self.top_offset = top_offset;
        self
    }

    #[must_use]
    pub const fn with_bottom_offset(mut self, bottom_offset: f64) -> Self {
        self.bottom_offset = bottom_offset;
        self
    }

    #[must_use]
    pub const fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    #[must_use]
    pub const fn with_hardware_acceleration(mut self, enabled: bool) -> Self {
        self.disable_hardware_acceleration = !enabled;
        self
    }

    #[must_use]
    pub const fn with_compensation(mut self, enabled: bool) -> Self {
        self.disable_compensation = !enabled;
        self
    }
}
