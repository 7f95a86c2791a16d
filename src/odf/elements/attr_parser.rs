//! Numeric attribute parsing for ODF table elements.
//!
//! Repeat counts and `office:value` are read on every cell of a sheet, so
//! these go through `atoi_simd` and `fast_float2` rather than `str::parse`.
//! Failures are reported as `MalformedAttribute` carrying the attribute's
//! prefixed name and raw value; the caller attaches the cell location.

use crate::common::{Error, Result};
use crate::odf::elements::element::ElementBase;
use crate::odf::elements::namespace::QualifiedName;
use atoi_simd::parse_skipped;

/// Parse a non-negative repeat count
///
/// # Examples
///
/// ```
/// # use odsgrid::odf::elements::attr_parser::parse_count;
/// assert_eq!(parse_count("1024").unwrap(), 1024);
/// assert!(parse_count("-1").is_err());
/// ```
#[inline]
pub fn parse_count(value: &str) -> Result<usize> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    parse_skipped::<u64>(digits.as_bytes())
        .ok()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| Error::InvalidFormat(format!("Invalid count value: {}", value)))
}

/// Parse a floating-point value the way a spreadsheet stores it
///
/// # Examples
///
/// ```
/// # use odsgrid::odf::elements::attr_parser::parse_float;
/// assert_eq!(parse_float("4.5").unwrap(), 4.5);
/// assert_eq!(parse_float(" -1e3 ").unwrap(), -1000.0);
/// ```
#[inline]
pub fn parse_float(value: &str) -> Result<f64> {
    fast_float2::parse(value.trim())
        .map_err(|_| Error::InvalidFormat(format!("Invalid float value: {}", value)))
}

/// Read an optional count attribute such as `table:number-rows-repeated`
/// or `text:c`
pub fn count_attribute<E: ElementBase + ?Sized>(
    element: &E,
    name: &str,
    default: usize,
) -> Result<usize> {
    match attribute_by_name(element, name) {
        None => Ok(default),
        Some(raw) => parse_count(raw).map_err(|_| Error::malformed_attribute(name, Some(raw))),
    }
}

/// Read a required floating-point attribute
pub fn float_attribute<E: ElementBase + ?Sized>(element: &E, name: &str) -> Result<f64> {
    let raw = attribute_by_name(element, name).ok_or_else(|| Error::malformed_attribute(name, None))?;
    parse_float(raw).map_err(|_| Error::malformed_attribute(name, Some(raw)))
}

/// Read a required string attribute
pub fn required_attribute<'a, E: ElementBase + ?Sized>(element: &'a E, name: &str) -> Result<&'a str> {
    attribute_by_name(element, name).ok_or_else(|| Error::malformed_attribute(name, None))
}

fn attribute_by_name<'a, E: ElementBase + ?Sized>(element: &'a E, name: &str) -> Option<&'a str> {
    let name = QualifiedName::from_string(name);
    element.attribute(name.namespace_uri.as_deref()?, &name.local_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::element::Element;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("0").unwrap(), 0);
        assert_eq!(parse_count("3").unwrap(), 3);
        assert_eq!(parse_count(" 7 ").unwrap(), 7);
        assert_eq!(parse_count("+2").unwrap(), 2);
        assert_eq!(parse_count("007").unwrap(), 7);
        assert_eq!(parse_count("18446744073709551615").unwrap(), usize::MAX);
        assert!(parse_count("").is_err());
        assert!(parse_count("two").is_err());
        assert!(parse_count("1.5").is_err());
        assert!(parse_count("-3").is_err());
    }

    #[test]
    fn test_parse_float() {
        assert!((parse_float("3.14").unwrap() - 3.14).abs() < 1e-12);
        assert_eq!(parse_float("4").unwrap(), 4.0);
        assert!(parse_float("1,5").is_err());
        assert!(parse_float("").is_err());
    }

    #[test]
    fn test_count_attribute() {
        let row = Element::new("table:table-row");
        assert_eq!(count_attribute(&row, "table:number-rows-repeated", 1).unwrap(), 1);

        let row = row.with_attribute("table:number-rows-repeated", "12");
        assert_eq!(count_attribute(&row, "table:number-rows-repeated", 1).unwrap(), 12);

        let row = Element::new("table:table-row").with_attribute("table:number-rows-repeated", "x");
        match count_attribute(&row, "table:number-rows-repeated", 1) {
            Err(Error::MalformedAttribute { attribute, value, .. }) => {
                assert_eq!(attribute, "table:number-rows-repeated");
                assert_eq!(value.as_deref(), Some("x"));
            },
            other => panic!("expected MalformedAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_float_attribute_missing() {
        let cell = Element::new("table:table-cell");
        match float_attribute(&cell, "office:value") {
            Err(Error::MalformedAttribute { value: None, .. }) => {},
            other => panic!("expected missing MalformedAttribute, got {:?}", other),
        }
    }
}
