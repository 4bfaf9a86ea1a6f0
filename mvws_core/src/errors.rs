//! # Error Types
//!
//! Structured error types for mvws_core. The calculation path is total and
//! never fails; these errors cover the report-rendering surface, with enough
//! context to understand and fix issues programmatically.
//!
//! ## Example
//!
//! ```rust
//! use mvws_core::errors::{CalcError, CalcResult};
//!
//! fn require_rows(rows: &[u32]) -> CalcResult<()> {
//!     if rows.is_empty() {
//!         return Err(CalcError::InvalidInput {
//!             field: "bom".to_string(),
//!             value: "empty".to_string(),
//!             reason: "At least one BOM row is required".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mvws_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for report operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic handling by callers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Report generation failed (Typst compilation or PDF export)
    #[error("Report generation failed during {stage}: {reason}")]
    ReportFailed { stage: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ReportFailed error
    pub fn report_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ReportFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ReportFailed { .. } => "REPORT_FAILED",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
