//! # Engine Module
//!
//! Transactional write orchestration on top of the repositories.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BookingEngine       ← appointment lifecycle (create/confirm/           │
//! │                        complete/cancel/delete)                          │
//! │  WalkInEngine        ← one-shot walk-in sessions                        │
//! │  Dashboard           ← read-only daily aggregates                       │
//! │       │                                                                 │
//! │       │  compose conn-level repository helpers                          │
//! │       ▼                                                                 │
//! │  repository::*       ← SQL                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clipper_core        ← money math, pricing rules, state machine         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every engine write path runs inside one `pool.begin()` transaction, so a
//! failure at any step rolls back the whole operation, including customers
//! created on the way in.

pub mod booking;
pub mod dashboard;
pub mod sequence;
pub mod walk_in;

use thiserror::Error;

use crate::error::DbError;
use clipper_core::CoreError;

/// Unified error for engine operations.
///
/// Core errors carry business meaning (invalid transition, exhausted
/// sequence, bad input); database errors carry storage meaning (not found,
/// duplicate phone, I/O). Both pass through transparently so callers match
/// on the underlying variant.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<clipper_core::ValidationError> for EngineError {
    fn from(err: clipper_core::ValidationError) -> Self {
        EngineError::Core(CoreError::Validation(err))
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// How many times a write is retried when a generated reference number
/// collides with a concurrently inserted one.
pub(crate) const REFERENCE_RETRY_ATTEMPTS: u32 = 3;

impl EngineError {
    /// True when the failure is a reference-number collision that a retry
    /// with a freshly allocated sequence can resolve.
    pub(crate) fn is_reference_conflict(&self) -> bool {
        matches!(self, EngineError::Db(db) if db.is_reference_conflict())
    }
}
