// =============================================================================
// clipper-db: Database Layer
// =============================================================================
//
// SQLite persistence for the Clipper booking and ledger engine.
//
// ## Architecture
//
// ```
// ┌─────────────────────────────────────────────────────────────────────┐
// │                           clipper-db                                │
// │                                                                     │
// │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────────────┐  │
// │  │   pool    │  │  migrations  │  │         repository           │  │
// │  │           │  │              │  │                              │  │
// │  │ Database  │  │  embedded    │  │  customers  barbers          │  │
// │  │ DbConfig  │  │  schema      │  │  services   appointments     │  │
// │  │           │  │  versioning  │  │  sessions   settings         │  │
// │  └───────────┘  └──────────────┘  └──────────────────────────────┘  │
// │                                                                     │
// │  ┌───────────────────────────────────────────────────────────────┐  │
// │  │                           engine                              │  │
// │  │                                                               │  │
// │  │  sequence    booking (appointments)    walk_in    dashboard   │  │
// │  └───────────────────────────────────────────────────────────────┘  │
// └─────────────────────────────────────────────────────────────────────┘
// ```
//
// Repositories expose pool-based reads plus connection-level write helpers,
// so the engines can compose every write path into a single transaction.
// =============================================================================

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::booking::{BookingEngine, NewAppointment};
pub use engine::dashboard::{Dashboard, DashboardSummary};
pub use engine::sequence::ReferenceKind;
pub use engine::walk_in::{RecordWalkIn, WalkInEngine, WalkInReceipt};
pub use engine::{EngineError, EngineResult};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
