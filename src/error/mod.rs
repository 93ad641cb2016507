//! Error handling for the portal
//!
//! This module defines error types and formatting used throughout the application.

pub mod formatting;
pub mod types;

pub use formatting::{format_error, format_error_for_logging};
pub use types::{Error, Result};
