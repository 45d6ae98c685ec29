//! Pixel to em/rem conversion helpers for breakpoints and spacing scales.
//!
//! The plain variants (`to_em`, `to_rem`, `to_rem_all`) are best effort and
//! always produce a string. The `try_` variants reject values whose unit has
//! no sensible conversion.

use crate::ParseError;
use crate::chapter_4_numbers::{format_number, strip_unit};
use crate::chapter_6_dimensions::{LengthUnit, classify_length};
use log::warn;

/// Pixels in one em at the initial font size; also the default rem base.
pub const PX_PER_EM: f64 = 16.0;

/// A length as handed to the converters: a raw number or CSS text.
#[derive(Clone, Debug, PartialEq)]
pub enum CssInput {
    Number(f64),
    Text(String),
}

impl From<f64> for CssInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for CssInput {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for CssInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for CssInput {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for CssInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CssInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The pixel size one rem resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemBase(f64);

impl RemBase {
    /// Browser default root font size.
    pub const DEFAULT: Self = Self(PX_PER_EM);

    pub const fn from_px(px: f64) -> Self {
        Self(px)
    }

    pub const fn px(self) -> f64 {
        self.0
    }

    /// Resolve a base written in CSS.
    ///
    /// `%` is relative to the 16px browser default (`62.5%` is 10px), `rem`
    /// is scaled by 16px, and bare numbers or anything else are read as pixels.
    pub fn parse(text: &str) -> Self {
        let magnitude = strip_unit(text);
        match classify_length(text).map(|length| length.unit) {
            Ok(LengthUnit::Percent) => Self(magnitude / 100.0 * PX_PER_EM),
            Ok(LengthUnit::RootEms) => Self(magnitude * PX_PER_EM),
            _ => Self(magnitude),
        }
    }

    /// Like [`RemBase::parse`], but only accepts unitless, px, % and rem bases.
    ///
    /// # Errors
    /// Returns the classification error, or `ParseError::UnsupportedUnit`.
    pub fn try_parse(text: &str) -> Result<Self, ParseError> {
        let length = classify_length(text)?;
        match length.unit {
            LengthUnit::Unitless | LengthUnit::Pixels => Ok(Self(length.value)),
            LengthUnit::Percent => Ok(Self(length.value / 100.0 * PX_PER_EM)),
            LengthUnit::RootEms => Ok(Self(length.value * PX_PER_EM)),
            LengthUnit::Ems | LengthUnit::Other(_) => {
                Err(ParseError::UnsupportedUnit(length.unit.suffix().to_owned()))
            }
        }
    }
}

impl Default for RemBase {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for RemBase {
    fn from(px: f64) -> Self {
        Self(px)
    }
}

impl From<i32> for RemBase {
    fn from(px: i32) -> Self {
        Self(f64::from(px))
    }
}

impl From<&str> for RemBase {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Convert a unitless, pixel, or rem value to em, for use in media query breakpoints.
///
/// Numbers, unitless strings and strings ending in `px` are divided by 16.
/// `em` and `rem` strings keep their magnitude. Other units are relabelled
/// as-is.
pub fn to_em(value: impl Into<CssInput>) -> String {
    let magnitude = match value.into() {
        CssInput::Number(number) => number / PX_PER_EM,
        CssInput::Text(text) => {
            let magnitude = strip_unit(&text);
            match classify_length(&text).map(|length| length.unit) {
                Ok(LengthUnit::Pixels | LengthUnit::Unitless) | Err(ParseError::Empty) => {
                    magnitude / PX_PER_EM
                }
                Ok(LengthUnit::Ems | LengthUnit::RootEms) => magnitude,
                Ok(unit) => {
                    warn!(target: "css_values_units", "to_em: relabelling `{text}` ({}) as em", unit.suffix());
                    magnitude
                }
                Err(_) if ends_in_px(&text) => magnitude / PX_PER_EM,
                Err(err) => {
                    warn!(target: "css_values_units", "to_em: `{text}` is not a length ({err})");
                    magnitude
                }
            }
        }
    };
    format!("{}em", format_number(magnitude))
}

/// Loose pixel check for text the tokenizer does not read as one length, e.g. `24 px`.
fn ends_in_px(text: &str) -> bool {
    text.trim_end().to_ascii_lowercase().ends_with("px")
}

/// Strict [`to_em`].
///
/// # Errors
/// Fails for text that is not a single length, or whose unit is not px, em or rem.
pub fn try_to_em(value: impl Into<CssInput>) -> Result<String, ParseError> {
    let magnitude = match value.into() {
        CssInput::Number(number) => number / PX_PER_EM,
        CssInput::Text(text) => {
            let length = classify_length(&text)?;
            match length.unit {
                LengthUnit::Pixels | LengthUnit::Unitless => length.value / PX_PER_EM,
                LengthUnit::Ems | LengthUnit::RootEms => length.value,
                LengthUnit::Percent | LengthUnit::Other(_) => {
                    return Err(ParseError::UnsupportedUnit(length.unit.suffix().to_owned()));
                }
            }
        }
    };
    Ok(format!("{}em", format_number(magnitude)))
}

/// Convert a pixel value to rem against `base`.
///
/// Any unit other than em/rem is assumed to be pixels. `rem` values are
/// passed through, `em` values are taken as already rem-sized. A zero
/// result is written as a bare `0`.
pub fn to_rem(value: impl Into<CssInput>, base: impl Into<RemBase>) -> String {
    rem_string(rem_magnitude(value.into(), base.into()))
}

/// Convert each value with [`to_rem`] and join them with spaces, e.g. for a `margin` shorthand.
pub fn to_rem_all<I>(values: I, base: impl Into<RemBase>) -> String
where
    I: IntoIterator,
    I::Item: Into<CssInput>,
{
    let resolved = base.into();
    values
        .into_iter()
        .map(|value| rem_string(rem_magnitude(value.into(), resolved)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strict [`to_rem`].
///
/// # Errors
/// Fails for text that is not a single length, or whose unit is not unitless, px, em or rem.
pub fn try_to_rem(value: impl Into<CssInput>, base: RemBase) -> Result<String, ParseError> {
    let magnitude = match value.into() {
        CssInput::Number(number) => number / base.px(),
        CssInput::Text(text) => {
            let length = classify_length(&text)?;
            match length.unit {
                LengthUnit::Pixels | LengthUnit::Unitless => length.value / base.px(),
                LengthUnit::Ems | LengthUnit::RootEms => length.value,
                LengthUnit::Percent | LengthUnit::Other(_) => {
                    return Err(ParseError::UnsupportedUnit(length.unit.suffix().to_owned()));
                }
            }
        }
    };
    Ok(rem_string(magnitude))
}

/// Strict [`to_rem_all`]; stops at the first value that fails.
///
/// # Errors
/// Returns the first [`try_to_rem`] error.
pub fn try_to_rem_all<I>(values: I, base: RemBase) -> Result<String, ParseError>
where
    I: IntoIterator,
    I::Item: Into<CssInput>,
{
    let converted = values
        .into_iter()
        .map(|value| try_to_rem(value, base))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(converted.join(" "))
}

fn rem_magnitude(input: CssInput, base: RemBase) -> f64 {
    match input {
        CssInput::Number(number) => number / base.px(),
        CssInput::Text(text) => {
            let magnitude = strip_unit(&text);
            match classify_length(&text).map(|length| length.unit) {
                Ok(LengthUnit::Ems | LengthUnit::RootEms) => magnitude,
                Ok(LengthUnit::Other(unit)) => {
                    warn!(target: "css_values_units", "to_rem: treating `{text}` ({unit}) as pixels");
                    magnitude / base.px()
                }
                _ => magnitude / base.px(),
            }
        }
    }
}

fn rem_string(magnitude: f64) -> String {
    let number = format_number(magnitude);
    if number == "0" {
        number
    } else {
        format!("{number}rem")
    }
}
