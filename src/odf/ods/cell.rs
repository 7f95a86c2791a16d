//! Cell values for ODS spreadsheets.
//!
//! A `table:table-cell` stores its typed value in attributes
//! (`office:value-type`, `office:value`, `office:date-value`) and its
//! displayed text in `text:p` children. [`decode_cell`] turns one cell
//! element into a [`Scalar`].

use crate::common::{Error, Result};
use crate::odf::datatype::{DateTimeOdf, TimeOfDay};
use crate::odf::elements::attr_parser::{float_attribute, required_attribute};
use crate::odf::elements::element::ElementBase;
use crate::odf::elements::namespace::OFFICENS;
use crate::odf::elements::text::decode_text;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Displayed text a spreadsheet writes for the "not available" error value
pub const NOT_AVAILABLE_TEXT: &str = "#N/A";

/// A single decoded cell value.
///
/// `NotAvailable` is the spreadsheet's `#N/A` marker and is distinct from
/// `Empty`, which stands for "no value".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Scalar {
    /// No value
    #[default]
    Empty,
    /// Boolean value
    Boolean(bool),
    /// Integral float value (only produced when float conversion is on)
    Int(i64),
    /// Numeric, percentage or currency value
    Float(f64),
    /// Text string
    String(String),
    /// Calendar date-time
    DateTime(NaiveDateTime),
    /// Time of day
    Time(NaiveTime),
    /// The `#N/A` marker
    NotAvailable,
}

impl Scalar {
    /// Check if this is the empty value
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Empty)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Empty => Ok(()),
            Scalar::Boolean(value) => write!(f, "{}", if *value { "TRUE" } else { "FALSE" }),
            Scalar::Int(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{}", value),
            Scalar::String(value) => f.write_str(value),
            Scalar::DateTime(value) => write!(f, "{}", value),
            Scalar::Time(value) => write!(f, "{}", value),
            Scalar::NotAvailable => f.write_str(NOT_AVAILABLE_TEXT),
        }
    }
}

/// Decode one value cell
///
/// Errors carry no location; the caller knows where the cell sits.
pub fn decode_cell<E: ElementBase + ?Sized>(cell: &E, convert_float: bool) -> Result<Scalar> {
    let literal = cell.text();
    if literal == NOT_AVAILABLE_TEXT {
        return Ok(Scalar::NotAvailable);
    }

    let Some(kind) = cell.attribute(OFFICENS, "value-type") else {
        return Ok(Scalar::Empty);
    };

    match kind {
        "boolean" => Ok(Scalar::Boolean(literal == "TRUE")),
        "float" => {
            let value = float_attribute(cell, "office:value")?;
            Ok(match integral(value) {
                Some(int) if convert_float => Scalar::Int(int),
                _ => Scalar::Float(value),
            })
        },
        "percentage" | "currency" => Ok(Scalar::Float(float_attribute(cell, "office:value")?)),
        "string" => {
            let text = decode_text(cell)?;
            Ok(if text.is_empty() { Scalar::Empty } else { Scalar::String(text) })
        },
        "date" => {
            let raw = required_attribute(cell, "office:date-value")?;
            DateTimeOdf::decode(raw)
                .map(Scalar::DateTime)
                .map_err(|_| Error::malformed_attribute("office:date-value", Some(raw)))
        },
        "time" => TimeOfDay::decode(&literal)
            .map(Scalar::Time)
            .map_err(|_| Error::MalformedText {
                text: literal.clone(),
                location: None,
            }),
        other => Err(Error::UnrecognizedCellType {
            kind: other.to_string(),
            location: None,
        }),
    }
}

/// The value as an `i64` when it has no fractional part and fits
fn integral(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (value.is_finite() && value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value))
        .then_some(value as i64)
}
