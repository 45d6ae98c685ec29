//! CSS Values and Units Module Level 3 — numbers, lengths, and em/rem conversion helpers.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

use core::fmt;

// Per-chapter modules mirroring the spec table of contents, plus the
// conversion helpers built on top of them.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;
pub mod conversions;

// Re-exports for ergonomic access from other crates.
pub use chapter_4_numbers::{format_number, strip_unit};
pub use chapter_6_dimensions::{Length, LengthUnit, classify_length, parse_length};
pub use conversions::{
    CssInput, PX_PER_EM, RemBase, to_em, to_rem, to_rem_all, try_to_em, try_to_rem,
    try_to_rem_all,
};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or only whitespace.
    Empty,
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A dimension was parsed but its unit is not accepted here.
    UnsupportedUnit(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("empty length value"),
            Self::UnexpectedToken => formatter.write_str("unexpected token in length value"),
            Self::UnsupportedUnit(unit) => write!(formatter, "unsupported unit `{unit}`"),
        }
    }
}

impl core::error::Error for ParseError {}
