//! odsgrid - Read OpenDocument spreadsheets as rectangular grids
//!
//! This library turns the sheets of an `.ods` document into fully
//! materialized, zero-indexed grids of typed values, ready to hand to a
//! tabular consumer.
//!
//! # Features
//!
//! - **Repeat expansion**: `table:number-rows-repeated` and
//!   `table:number-columns-repeated` are expanded, with trailing blank rows
//!   and columns dropped instead of materialized
//! - **Typed cells**: booleans, integers, floats, percentages, currencies,
//!   strings, dates, times and the `#N/A` marker
//! - **Space runs**: `<text:s text:c="N"/>` markers decode to literal spaces
//! - **Package loading** (`package` feature, on by default): open `.ods` ZIP
//!   files directly
//!
//! # Example - Reading a sheet
//!
//! ```no_run
//! use odsgrid::{Spreadsheet, extract_grid, sheet_by_name};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = Spreadsheet::open("budget.ods")?;
//! let sheet = sheet_by_name(&doc, "2024")?;
//!
//! for row in extract_grid(&sheet, true)? {
//!     let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
//!     println!("{}", cells.join("\t"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Every sheet at once
//!
//! ```no_run
//! use odsgrid::{ExtractOptions, Spreadsheet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = Spreadsheet::open("budget.ods")?;
//! let options = ExtractOptions::default().with_convert_float(false);
//!
//! for (name, grid) in doc.extract_all(&options)? {
//!     println!("{}: {} rows", name, grid.len());
//! }
//! # Ok(())
//! # }
//! ```

/// Common types shared across the crate (errors)
pub mod common;

/// OpenDocument spreadsheet reading
pub mod odf;

pub use common::{Error, Result};
pub use odf::coordinates::{CellCoord, Location};
pub use odf::ods::{
    ExtractOptions, Grid, Scalar, Sheet, Spreadsheet, extract_grid, list_sheets, sheet_by_index,
    sheet_by_name,
};
