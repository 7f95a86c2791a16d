//! Cell coordinate utilities (A1 notation).
//!
//! Extraction errors report where they happened. This module converts the
//! physical (repeat-expanded) row and column positions the extraction engine
//! tracks into the A1 notation spreadsheet users recognise.
//!
//! Positions saturate at `usize::MAX` when repeat counts are absurd, so the
//! conversions here never overflow.

use std::fmt;

/// Convert numeric column to alphabetic notation (0-indexed)
///
/// # Examples
///
/// ```
/// use odsgrid::odf::coordinates::digit_to_alpha;
///
/// assert_eq!(digit_to_alpha(0), "A");
/// assert_eq!(digit_to_alpha(25), "Z");
/// assert_eq!(digit_to_alpha(26), "AA");
/// ```
pub fn digit_to_alpha(digit: usize) -> String {
    let mut column = String::new();
    let mut rest = Some(digit);

    while let Some(n) = rest {
        column.insert(0, char::from(b'A' + (n % 26) as u8));
        rest = (n / 26).checked_sub(1);
    }

    column
}

/// Cell coordinates (column, row) both 0-indexed
///
/// # Examples
///
/// ```
/// use odsgrid::odf::coordinates::CellCoord;
///
/// let coord = CellCoord::new(1, 2);
/// assert_eq!(coord.to_string(), "B3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    column: usize,
    row: usize,
}

impl CellCoord {
    /// Create a new cell coordinate
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Get column index (0-indexed)
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Get row index (0-indexed)
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Convert to A1 notation string
    pub fn to_a1(&self) -> String {
        format!("{}{}", digit_to_alpha(self.column), self.row.saturating_add(1))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Where in a sheet an extraction error originated.
///
/// Row-level problems (a malformed `table:number-rows-repeated`) only know
/// their row; everything decoded from a cell knows both coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Physical row index (0-indexed, repeats expanded)
    Row(usize),
    /// Physical cell position (repeats expanded)
    Cell(CellCoord),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Row(row) => write!(f, "row {}", row.saturating_add(1)),
            Location::Cell(coord) => write!(f, "cell {}", coord),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_to_alpha() {
        assert_eq!(digit_to_alpha(0), "A");
        assert_eq!(digit_to_alpha(25), "Z");
        assert_eq!(digit_to_alpha(26), "AA");
        assert_eq!(digit_to_alpha(51), "AZ");
        assert_eq!(digit_to_alpha(52), "BA");
        assert_eq!(digit_to_alpha(701), "ZZ");
        assert_eq!(digit_to_alpha(702), "AAA");
        // Last column LibreOffice Calc allows
        assert_eq!(digit_to_alpha(16383), "XFD");
    }

    #[test]
    fn test_saturated_coordinates_format() {
        let column = digit_to_alpha(usize::MAX);
        assert!(!column.is_empty());
        assert!(column.chars().all(|c| c.is_ascii_uppercase()));

        let coord = CellCoord::new(usize::MAX, usize::MAX);
        assert!(coord.to_a1().ends_with(&usize::MAX.to_string()));
        assert_eq!(Location::Row(usize::MAX).to_string(), format!("row {}", usize::MAX));
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Row(0).to_string(), "row 1");
        assert_eq!(Location::Cell(CellCoord::new(1, 2)).to_string(), "cell B3");
        assert_eq!(Location::Cell(CellCoord::new(26, 9)).to_string(), "cell AA10");
    }
}
