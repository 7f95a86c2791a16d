//! Grid extraction for ODS sheets.
//!
//! Rows and cells in `content.xml` carry repeat counts, and a sheet usually
//! ends in a run of a million repeated blank rows. Extraction expands repeats
//! lazily: runs of empty values are held back and only written out when
//! something non-empty follows them, so trailing blanks never materialize.
//! The result is padded into a rectangle.

use super::cell::{Scalar, decode_cell};
use super::sheet::Sheet;
use crate::common::{Error, Result};
use crate::odf::coordinates::{CellCoord, Location};
use crate::odf::elements::table::{CellNode, TableRow};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::iter::repeat_n;

/// A fully materialized, rectangular sheet
pub type Grid = Vec<Vec<Scalar>>;

/// Options controlling grid extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Return integral float cells as [`Scalar::Int`]
    pub convert_float: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { convert_float: true }
    }
}

impl ExtractOptions {
    /// Set whether integral float cells become [`Scalar::Int`]
    pub fn with_convert_float(mut self, convert_float: bool) -> Self {
        self.convert_float = convert_float;
        self
    }
}

/// Run of empty values seen but not yet written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Pending {
    #[default]
    None,
    Empty(usize),
}

impl Pending {
    fn defer(&mut self, count: usize) {
        *self = match *self {
            Pending::None if count == 0 => Pending::None,
            Pending::None => Pending::Empty(count),
            Pending::Empty(held) => Pending::Empty(held.saturating_add(count)),
        };
    }

    fn take(&mut self) -> usize {
        match std::mem::take(self) {
            Pending::None => 0,
            Pending::Empty(held) => held,
        }
    }
}

/// Extract the sheet as a rectangular grid
///
/// Interior blank rows and cells are kept; blank rows and columns after the
/// last non-empty content are dropped. The first decoding error aborts the
/// extraction and carries the physical row or cell where it happened.
///
/// # Examples
///
/// ```
/// use odsgrid::{Scalar, Spreadsheet, extract_grid, sheet_by_index};
///
/// # fn main() -> odsgrid::Result<()> {
/// let doc = Spreadsheet::from_content_xml(br#"
///     <table:table table:name="S">
///       <table:table-row table:number-rows-repeated="2">
///         <table:table-cell office:value-type="float" office:value="1"><text:p>1</text:p></table:table-cell>
///       </table:table-row>
///     </table:table>"#)?;
/// let grid = extract_grid(&sheet_by_index(&doc, 0)?, true)?;
/// assert_eq!(grid, vec![vec![Scalar::Int(1)], vec![Scalar::Int(1)]]);
/// # Ok(())
/// # }
/// ```
pub fn extract_grid(sheet: &Sheet<'_>, convert_float: bool) -> Result<Grid> {
    let mut grid = Grid::new();
    let mut widest = 0;
    let mut blank_rows = Pending::None;
    let mut physical_row = 0usize;

    for row in sheet.table().rows() {
        let values = decode_row(&row, physical_row, convert_float)?;
        // Rows later classified as empty still count towards the width.
        widest = widest.max(values.len());

        let repeat = row
            .repeat_count()
            .map_err(|err| err.at(Location::Row(physical_row)))?;

        if row.is_empty() {
            blank_rows.defer(repeat);
            trace!("row {}: empty x{}, deferred", physical_row, repeat);
        } else {
            let blanks = blank_rows.take();
            trace!(
                "row {}: {} values x{}, {} blank rows flushed",
                physical_row,
                values.len(),
                repeat,
                blanks
            );
            reserve(&mut grid, blanks, repeat)
                .map_err(|err| err.at(Location::Row(physical_row)))?;
            grid.extend(repeat_n(vec![Scalar::Empty], blanks));
            grid.extend(repeat_n(values, repeat));
        }

        physical_row = physical_row.saturating_add(repeat);
    }

    let dropped = blank_rows.take();
    let width = grid.iter().map(Vec::len).fold(widest, usize::max);
    for row in &mut grid {
        row.resize(width, Scalar::Empty);
    }

    debug!(
        "extracted sheet '{}': {} rows x {} columns, {} trailing blank rows dropped",
        sheet.name(),
        grid.len(),
        width,
        dropped
    );
    Ok(grid)
}

/// Decode one row element, expanding column repeats up to the last
/// non-empty value
fn decode_row(row: &TableRow<'_>, physical_row: usize, convert_float: bool) -> Result<Vec<Scalar>> {
    let mut values = Vec::new();
    let mut blank_cells = Pending::None;
    let mut column = 0usize;

    for node in row.cells() {
        let (cell, value) = match node {
            CellNode::Value(cell) => (cell, decode_cell(cell.element(), convert_float)),
            CellNode::Covered(cell) => (cell, Ok(Scalar::Empty)),
            CellNode::Other => continue,
        };
        let here = Location::Cell(CellCoord::new(column, physical_row));
        let value = value.map_err(|err| err.at(here))?;
        let repeat = cell.repeat_count().map_err(|err| err.at(here))?;

        if value.is_empty() {
            blank_cells.defer(repeat);
        } else {
            let blanks = blank_cells.take();
            reserve(&mut values, blanks, repeat).map_err(|err| err.at(here))?;
            values.extend(repeat_n(Scalar::Empty, blanks));
            values.extend(repeat_n(value, repeat));
        }

        column = column.saturating_add(repeat);
    }

    Ok(values)
}

/// Make room for `blanks + repeat` more entries, failing instead of
/// aborting when that cannot be allocated
fn reserve<T>(out: &mut Vec<T>, blanks: usize, repeat: usize) -> Result<()> {
    blanks
        .checked_add(repeat)
        .and_then(|more| out.try_reserve(more).ok())
        .ok_or_else(|| Error::capacity_exceeded(blanks.saturating_add(repeat)))
}
