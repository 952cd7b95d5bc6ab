//! # clipper-core: Pure Business Logic for Clipper
//!
//! This crate is the **heart** of the Clipper barbershop manager. It contains
//! the booking and ledger rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Clipper Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Booking Form / Schedule UI                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ clipper-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │ Commission│  │   rules   │  │   │
//! │  │   │Appointment│  │  Loyalty  │  │  Resolver │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    clipper-db (Database Layer)                  │   │
//! │  │        SQLite queries, migrations, repositories, engines        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Barber, Service, Appointment, Session)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Commission resolution (service override, else barber rate)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation helpers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use clipper_core::money::Money;
//! use clipper_core::types::CommissionRate;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(10_000); // 100.00
//!
//! // Commission at 30% (3000 basis points)
//! let rate = CommissionRate::from_bps(3000);
//! assert_eq!(price.commission(rate).cents(), 3_000);
//!
//! // Loyalty: one point per ten currency units
//! assert_eq!(Money::from_cents(15_500).loyalty_points(), 15);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use clipper_core::Money` instead of
// `use clipper_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::{effective_commission_rate, resolve_pricing, PriceBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Business-wide fallback commission rate: 30% (3000 basis points).
///
/// ## Why a constant?
/// A barber row created without an explicit rate earns the shop default.
/// The effective rate for a transaction is resolved in [`pricing`]:
/// service override first, barber rate second.
pub const DEFAULT_COMMISSION_RATE_BPS: u32 = 3000;

/// Cents of completed spend that earn one loyalty point (ten currency units).
pub const LOYALTY_CENTS_PER_POINT: i64 = 1000;

/// Highest daily sequence number a reference can carry (3-digit padding).
///
/// A 1000th appointment or session on one calendar day is a
/// `SequenceExhausted` error, never a silently colliding number.
pub const MAX_DAILY_SEQUENCE: i64 = 999;
