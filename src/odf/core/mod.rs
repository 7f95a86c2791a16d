//! Core ODF package functionality.
//!
//! Reading the ZIP container an OpenDocument file is shipped in.

/// ODF package handling
mod package;

pub use package::{Package, SPREADSHEET_MIMETYPE, SPREADSHEET_TEMPLATE_MIMETYPE};
