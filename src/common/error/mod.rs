//! Unified error types for odsgrid.
//!
//! This module provides a unified error type that encompasses loading,
//! lookup and decoding failures, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
