//! Configuration for the scroll simulation.
//!
//! Values come from `PERCH_*` environment variables or are constructed
//! programmatically; anything missing or unparsable falls back to its default.

use css_position::StickyConfig;
use std::env;

/// Geometry and sticky settings for one simulated scroll.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Height of the sticky container in pixels
    pub container_height: f64,
    /// Height of the sticky content in pixels
    pub content_height: f64,
    /// Initial distance between the viewport top and the container top
    pub start_offset: f64,
    /// Pixels scrolled per frame (at least 1)
    pub scroll_step: f64,
    /// Upper bound on replayed frames; longer replays are refused
    pub max_frames: usize,
    /// Settings handed to the mounted sticky element
    pub sticky: StickyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            container_height: 1000.0,
            content_height: 100.0,
            start_offset: 200.0,
            scroll_step: 50.0,
            max_frames: 10_000,
            sticky: StickyConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `PERCH_CONTAINER_HEIGHT`: container height in pixels (default: 1000)
    /// - `PERCH_CONTENT_HEIGHT`: sticky content height in pixels (default: 100)
    /// - `PERCH_START_OFFSET`: initial container top in pixels (default: 200)
    /// - `PERCH_SCROLL_STEP`: pixels per frame (default: 50, minimum 1)
    /// - `PERCH_MAX_FRAMES`: most frames a replay may take (default: 10000, minimum 1)
    /// - `PERCH_TOP_OFFSET` / `PERCH_BOTTOM_OFFSET`: sticky offsets (default: 0)
    /// - `PERCH_RELATIVE`: set to "1" to scroll the container instead of the window
    /// - `PERCH_NO_HW_ACCEL`: set to "1" to drop `translateZ(0)`
    /// - `PERCH_NO_COMPENSATION`: set to "1" to leave the placeholder unpadded
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; [`SimulationConfig::from_env`] uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |name: &str, default: f64| {
            lookup(name)
                .and_then(|val| val.trim().parse::<f64>().ok())
                .filter(|val| val.is_finite())
                .unwrap_or(default)
        };
        let flag = |name: &str| lookup(name).as_deref() == Some("1");

        let sticky = StickyConfig::new()
            .with_top_offset(number("PERCH_TOP_OFFSET", 0.0))
            .with_bottom_offset(number("PERCH_BOTTOM_OFFSET", 0.0))
            .with_relative(flag("PERCH_RELATIVE"))
            .with_hardware_acceleration(!flag("PERCH_NO_HW_ACCEL"))
            .with_compensation(!flag("PERCH_NO_COMPENSATION"));

        Self {
            container_height: number("PERCH_CONTAINER_HEIGHT", defaults.container_height).max(0.0),
            content_height: number("PERCH_CONTENT_HEIGHT", defaults.content_height).max(0.0),
            start_offset: number("PERCH_START_OFFSET", defaults.start_offset),
            scroll_step: number("PERCH_SCROLL_STEP", defaults.scroll_step).max(1.0),
            max_frames: lookup("PERCH_MAX_FRAMES")
                .and_then(|val| val.trim().parse::<usize>().ok())
                .unwrap_or(defaults.max_frames)
                .max(1),
            sticky,
        }
    }

    /// Total distance scrolled: until the container has left the viewport top.
    pub fn scroll_distance(&self) -> f64 {
        (self.start_offset + self.container_height).max(0.0)
    }
}
