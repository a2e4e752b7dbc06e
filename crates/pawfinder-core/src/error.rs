//! # Error Types
//!
//! Domain-specific error types for pawfinder-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pawfinder-core errors (this file)                                     │
//! │  ├── CoreError        - Domain errors (comparison setup)               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pawfinder-session errors (separate crate)                             │
//! │  ├── SessionError     - Unknown instances, config failures             │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Out-of-range carousel navigation is clamped and image load failures
//! advance the fallback chain. Neither ever produces a value of these types.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core view-logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Comparison requested with too few or too many dogs.
    ///
    /// ## When This Occurs
    /// - Only one dog selected for comparison
    /// - More dogs selected than the table has columns for
    #[error("Cannot compare {count} dogs: choose between {min} and {max}")]
    InvalidComparison { count: usize, min: usize, max: usize },

    /// The same dog was selected twice for one comparison.
    #[error("Dog {0} appears more than once in the comparison")]
    DuplicateDog(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, unparsable URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
