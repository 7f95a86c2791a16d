//! Unified error types for odsgrid.
//!
//! This module provides a single error type covering document loading,
//! sheet lookup and cell decoding, presenting a consistent API to users.
use crate::odf::coordinates::Location;
use thiserror::Error;

/// Main error type for odsgrid operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Package part not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// No table carries the requested name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Positional sheet lookup outside `[0, count)`
    #[error("Sheet index {index} out of range (document has {count} sheets)")]
    IndexOutOfRange { index: usize, count: usize },

    /// The cell declares an `office:value-type` this crate does not decode
    #[error("Unrecognized cell type '{kind}'{}", at(.location))]
    UnrecognizedCellType {
        kind: String,
        location: Option<Location>,
    },

    /// A required numeric or date attribute is missing or unparseable
    #[error("Malformed attribute '{attribute}'{}: {}", at(.location), shown(.value))]
    MalformedAttribute {
        attribute: String,
        value: Option<String>,
        location: Option<Location>,
    },

    /// Cell text that should hold a time of day could not be parsed
    #[error("Malformed cell text{}: '{text}'", at(.location))]
    MalformedText {
        text: String,
        location: Option<Location>,
    },

    /// Expanding a repeat count would need more memory than can be allocated
    #[error("Repeat expansion too large{}: {requested} more values", at(.location))]
    CapacityExceeded {
        requested: usize,
        location: Option<Location>,
    },
}

impl Error {
    pub(crate) fn capacity_exceeded(requested: usize) -> Self {
        Error::CapacityExceeded {
            requested,
            location: None,
        }
    }

    pub(crate) fn malformed_attribute(attribute: &str, value: Option<&str>) -> Self {
        Error::MalformedAttribute {
            attribute: attribute.to_string(),
            value: value.map(str::to_string),
            location: None,
        }
    }

    /// Attach a location to a cell-level error that does not carry one yet.
    ///
    /// Errors that already know where they happened, and errors that are not
    /// tied to a position at all, are returned unchanged.
    pub fn at(mut self, here: Location) -> Self {
        match &mut self {
            Error::UnrecognizedCellType { location, .. }
            | Error::MalformedAttribute { location, .. }
            | Error::MalformedText { location, .. }
            | Error::CapacityExceeded { location, .. } => {
                location.get_or_insert(here);
            },
            _ => {},
        }
        self
    }

    /// Where the error happened, if it is tied to a row or cell.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::UnrecognizedCellType { location, .. }
            | Error::MalformedAttribute { location, .. }
            | Error::MalformedText { location, .. }
            | Error::CapacityExceeded { location, .. } => *location,
            _ => None,
        }
    }
}

fn at(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!(" at {}", location),
        None => String::new(),
    }
}

fn shown(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("'{}'", value),
        None => "missing".to_string(),
    }
}

/// Result type for odsgrid operations.
pub type Result<T> = std::result::Result<T, Error>;
