//! OpenDocument spreadsheet reading.
//!
//! - [`elements`]: the namespace-aware element tree of `content.xml`
//! - [`ods`]: sheets, cell decoding and grid extraction
//! - [`datatype`]: ISO 8601 date and time-of-day values
//! - [`coordinates`]: A1 cell references used in error locations

/// Cell coordinates and error locations
pub mod coordinates;
/// Date and time value parsing
pub mod datatype;
/// ODF XML element classes
pub mod elements;
/// ODF spreadsheet (.ods) support
pub mod ods;

/// ODF package (ZIP) support
#[cfg(feature = "package")]
pub mod core;

pub use ods::{ExtractOptions, Grid, Scalar, Sheet, Spreadsheet};
