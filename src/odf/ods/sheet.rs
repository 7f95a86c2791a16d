//! Sheet handles for ODS spreadsheets.

use super::extract::{ExtractOptions, Grid, extract_grid};
use crate::common::Result;
use crate::odf::elements::element::Element;
use crate::odf::elements::table::Table;

/// A sheet (worksheet) in an ODS spreadsheet.
///
/// Borrows its `table:table` element from the owning document.
#[derive(Debug, Clone, Copy)]
pub struct Sheet<'a> {
    table: Table<'a>,
}

impl<'a> Sheet<'a> {
    /// View a `table:table` element as a sheet
    pub fn from_element(element: &'a Element) -> Option<Self> {
        Table::from_element(element).map(|table| Self { table })
    }

    /// Get the name of the sheet.
    ///
    /// A table without `table:name` reports the empty string.
    pub fn name(&self) -> &'a str {
        self.table.name().unwrap_or_default()
    }

    /// Get the underlying table view
    pub fn table(&self) -> Table<'a> {
        self.table
    }

    /// Extract the sheet as a rectangular grid
    pub fn extract(&self, options: &ExtractOptions) -> Result<Grid> {
        extract_grid(self, options.convert_float)
    }
}
