//! OpenDocument Spreadsheet (.ods) implementation.
//!
//! This module locates the sheets of an ODS document and extracts each one
//! as a rectangular grid of typed cell values.

mod cell;
mod extract;
mod sheet;
mod spreadsheet;

pub use cell::{NOT_AVAILABLE_TEXT, Scalar, decode_cell};
pub use extract::{ExtractOptions, Grid, extract_grid};
pub use sheet::Sheet;
pub use spreadsheet::{Spreadsheet, list_sheets, sheet_by_index, sheet_by_name};
