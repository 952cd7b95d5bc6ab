//! # Error Types
//!
//! Domain-specific error types for clipper-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  clipper-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  clipper-db errors (separate crate)                                     │
//! │  ├── DbError          - Store failures, NotFound, DuplicatePhone        │
//! │  └── EngineError      - Core ∪ Db, what the engines return              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → caller/UI            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (number, status, field)
//! 3. Errors are enum variants, never String
//! 4. None are retried automatically by the core - retry policy belongs to
//!    the caller

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An appointment state-machine rule was violated.
    ///
    /// ## When This Occurs
    /// - Confirming anything but a pending appointment
    /// - Completing a cancelled or already-completed appointment
    /// - Cancelling a completed appointment
    #[error("appointment {id} is {current}, cannot {attempted}")]
    InvalidTransition {
        id: String,
        current: String,
        attempted: String,
    },

    /// More than 999 reference numbers requested for one kind on one day.
    ///
    /// The 3-digit suffix cannot represent a 1000th number; this is surfaced
    /// to the caller rather than silently wrapping around.
    #[error("daily sequence exhausted for {prefix} on {date} (max 999)")]
    SequenceExhausted { prefix: String, date: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input doesn't meet requirements. They are surfaced
/// to the caller verbatim, never auto-corrected.
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

    /// Invalid format (e.g., malformed phone, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
