//! # Repository Module
//!
//! Database repository implementations for Clipper.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Engine / caller                                                        │
//! │       │                                                                 │
//! │       │  db.customers().find_by_phone("0501234567")                     │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                     │
//! │  ├── find_by_phone(&self, phone)                                        │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── search(&self, query)                                               │
//! │  └── ...                                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Flavours of Method
//!
//! - Pool-based methods on the repository struct: standalone reads and
//!   single-statement writes.
//! - Free functions taking `&mut SqliteConnection`: write steps that the
//!   engines compose inside a single transaction. Everything the engines
//!   persist goes through these, so a failure anywhere rolls back the lot.
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer identity and running totals
//! - [`barber::BarberRepository`] - Barber roster and running totals
//! - [`service::ServiceRepository`] - Service catalogue
//! - [`appointment::AppointmentRepository`] - Scheduled appointments
//! - [`session::SessionRepository`] - Walk-in sessions
//! - [`settings::SettingsRepository`] - Key/value shop settings

pub mod appointment;
pub mod barber;
pub mod customer;
pub mod service;
pub mod session;
pub mod settings;
