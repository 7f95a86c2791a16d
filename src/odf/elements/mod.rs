//! ODF XML element classes.
//!
//! This module provides the element tree read from `content.xml` and the
//! typed views the spreadsheet reader works through.

/// Numeric attribute parsing
pub mod attr_parser;
/// Core element functionality
pub mod element;
/// Namespace handling utilities
pub mod namespace;
/// Table-related elements (tables, rows, cells)
pub mod table;
/// Text decoding (space-run markers)
pub mod text;
