//! CSS Values & Units Level 3 — §6 Dimensions (Lengths subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::ParseError;
use crate::chapter_4_numbers::strip_unit;
use cssparser::{Parser, ParserInput, Token};

/// Unit tag of a length as written by the author.
///
/// Only px, em and rem take part in conversions; everything else is kept
/// verbatim (lowercased) so callers can decide what to do with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    /// A bare number, e.g. `24`.
    Unitless,
    Pixels,
    Ems,
    RootEms,
    Percent,
    /// Any other dimension unit (`vw`, `pt`, `ch`, ...).
    Other(String),
}

impl LengthUnit {
    /// Map a dimension unit (case-insensitive) to its tag.
    pub fn from_unit(unit: &str) -> Self {
        let lower = unit.to_ascii_lowercase();
        match lower.as_str() {
            "px" => Self::Pixels,
            "em" => Self::Ems,
            "rem" => Self::RootEms,
            "%" => Self::Percent,
            _ => Self::Other(lower),
        }
    }

    /// The unit suffix as it is written in CSS (`""` for unitless).
    pub fn suffix(&self) -> &str {
        match self {
            Self::Unitless => "",
            Self::Pixels => "px",
            Self::Ems => "em",
            Self::RootEms => "rem",
            Self::Percent => "%",
            Self::Other(unit) => unit,
        }
    }
}

/// A CSS <length> value with unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

/// Parse a single length-like token (§6.2): a dimension, a percentage, or a bare number.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is none of those.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    let Ok(token) = input.next() else {
        return Err(ParseError::UnexpectedToken);
    };
    match token.clone() {
        Token::Dimension { value, unit, .. } => Ok(Length {
            value: f64::from(value),
            unit: LengthUnit::from_unit(unit.as_ref()),
        }),
        Token::Percentage { unit_value, .. } => Ok(Length {
            value: f64::from(unit_value) * 100.0,
            unit: LengthUnit::Percent,
        }),
        Token::Number { value, .. } => Ok(Length {
            value: f64::from(value),
            unit: LengthUnit::Unitless,
        }),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Classify a whole string as one length.
///
/// The tokenizer decides the unit; the magnitude is re-read with [`strip_unit`]
/// at full `f64` precision, since tokens only carry `f32`.
///
/// # Errors
/// `ParseError::Empty` for blank input, `ParseError::UnexpectedToken` when
/// the text is not exactly one length token.
pub fn classify_length(text: &str) -> Result<Length, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);
    let token_length = parse_length(&mut parser)?;
    if parser.expect_exhausted().is_err() {
        return Err(ParseError::UnexpectedToken);
    }
    Ok(Length {
        value: strip_unit(trimmed),
        unit: token_length.unit,
    })
}
