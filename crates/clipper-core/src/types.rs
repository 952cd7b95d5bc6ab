//! # Domain Types
//!
//! Core domain types for the Clipper booking & ledger engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │   Appointment   │   │     Session     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  phone (unique) │   │  appointment_no │   │  session_no     │       │
//! │  │  loyalty_points │   │  status         │   │  final_price    │       │
//! │  │  total_spent    │   │  price/comm.    │   │  points_earned  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CommissionRate  │   │AppointmentStatus│   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Pending        │   │  Cash           │       │
//! │  │  3000 = 30%     │   │  Confirmed      │   │  Card           │       │
//! │  └─────────────────┘   │  Completed ...  │   │  Transfer       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Appointments and sessions carry two identifiers:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business number: `APP-YYYYMMDD-NNN` / `SES-YYYYMMDD-NNN` - human-readable,
//!   handed to the customer, unique per kind per calendar day
//!
//! ## Snapshot Pattern
//! Appointment and session rows copy customer/barber/service names and the
//! service's price/cost at creation time. A later edit to a Service must not
//! retroactively change past transactions - this denormalization is a
//! correctness feature, not an accident.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Commission Rate
// =============================================================================

/// Commission rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 3000 bps = 30% (the shop-wide default barber commission)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionRate(u32);

impl CommissionRate {
    /// Creates a commission rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CommissionRate(bps)
    }

    /// Creates a commission rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        CommissionRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero commission rate.
    #[inline]
    pub const fn zero() -> Self {
        CommissionRate(0)
    }

    /// Checks if the rate is zero.
    ///
    /// A zero service override is treated the same as no override: the
    /// barber's rate applies.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        CommissionRate(crate::DEFAULT_COMMISSION_RATE_BPS)
    }
}

// =============================================================================
// Status Enums
// =============================================================================

/// Whether a barber or catalogue service is currently offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl Default for ActiveStatus {
    fn default() -> Self {
        ActiveStatus::Active
    }
}

/// The lifecycle status of an appointment.
///
/// ## State Machine
/// ```text
/// pending ──► confirmed ──► completed
///    │            │
///    └────────────┴──► cancelled
/// ```
/// `NoShow` is a reserved terminal value: it exists in the data model but no
/// engine operation produces it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked, awaiting confirmation.
    Pending,
    /// Confirmed by the shop.
    Confirmed,
    /// Serviced and paid; aggregates credited.
    Completed,
    /// Called off before service; no financial side effects.
    Cancelled,
    /// Reserved: customer never arrived (no transition produces this yet).
    NoShow,
}

impl AppointmentStatus {
    /// Returns the lowercase database/wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    /// True once the appointment can no longer change status.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// ```text
    /// pending   → confirmed | completed | cancelled
    /// confirmed → completed | cancelled
    /// ```
    ///
    /// `NoShow` is a reserved terminal value kept for imported data; no
    /// transition produces it.
    pub const fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Pending, AppointmentStatus::Confirmed)
                | (AppointmentStatus::Pending, AppointmentStatus::Completed)
                | (AppointmentStatus::Pending, AppointmentStatus::Cancelled)
                | (AppointmentStatus::Confirmed, AppointmentStatus::Completed)
                | (AppointmentStatus::Confirmed, AppointmentStatus::Cancelled)
        )
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Pending
    }
}

/// Whether an appointment has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Bank transfer.
    Transfer,
}

/// The status of a walk-in session.
///
/// Sessions are recorded after the fact: there is no intermediate state in
/// this core, a session is `Completed` from the moment it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Completed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Completed
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer identity, keyed by phone.
///
/// Created on the first booking/session referencing a new phone; the loyalty
/// and spend aggregates are mutated on every completed appointment or session.
/// Never deleted by the core.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Identity key - globally unique, immutable once set.
    pub phone: String,

    /// Accumulated loyalty points (one per ten currency units spent).
    pub loyalty_points: i64,

    /// Number of completed visits.
    pub total_visits: i64,

    /// Lifetime completed spend in cents.
    pub total_spent_cents: i64,

    /// When the customer record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Timestamp of the most recent completed visit.
    #[ts(as = "Option<String>")]
    pub last_visit: Option<DateTime<Utc>>,
}

impl Customer {
    /// Returns the lifetime spend as a Money type.
    #[inline]
    pub fn total_spent(&self) -> Money {
        Money::from_cents(self.total_spent_cents)
    }
}

// =============================================================================
// Barber
// =============================================================================

/// A staff member who performs services.
///
/// Referenced by id from appointments/sessions; `total_services` and
/// `total_revenue_cents` grow additively on completion.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Commission rate in basis points (3000 = 30%); the fallback when the
    /// service carries no override.
    pub commission_rate_bps: u32,
    pub status: ActiveStatus,
    pub total_services: i64,
    pub total_revenue_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Barber {
    /// Returns the barber's commission rate.
    #[inline]
    pub fn commission_rate(&self) -> CommissionRate {
        CommissionRate::from_bps(self.commission_rate_bps)
    }

    /// Returns accumulated revenue as Money.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

// =============================================================================
// Service
// =============================================================================

/// A catalogue service (haircut, beard trim, package, ...).
///
/// Read-only from the engines' perspective: price, cost, and duration are
/// *defaults* copied into transactions at creation time, never referenced
/// live afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: String,
    pub duration_minutes: i64,
    /// List price in cents (the booking form's default quote).
    pub price_cents: i64,
    /// Material/operating cost in cents.
    pub cost_cents: i64,
    /// Optional commission override in basis points. `None` or zero means
    /// the barber's own rate applies.
    pub commission_rate_bps: Option<u32>,
    pub status: ActiveStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Returns the list price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the commission override, if one is set and non-zero.
    pub fn commission_override(&self) -> Option<CommissionRate> {
        match self.commission_rate_bps {
            Some(bps) if bps > 0 => Some(CommissionRate::from_bps(bps)),
            _ => None,
        }
    }
}

// =============================================================================
// Appointment
// =============================================================================

/// A booked appointment moving through the status state machine.
///
/// Customer/barber/service names are snapshots; `price_cents` is the quoted
/// price of record (the form defaults it to the service list price but the
/// operator may override it).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Appointment {
    pub id: String,
    /// Business number: `APP-YYYYMMDD-NNN`, unique, daily-increasing.
    pub appointment_number: String,
    pub customer_id: Option<String>,
    /// Customer name at booking time (frozen).
    pub customer_name: String,
    pub phone: String,
    pub barber_id: String,
    /// Barber name at booking time (frozen).
    pub barber_name: String,
    pub service_id: String,
    /// Service name at booking time (frozen).
    pub service_name: String,
    #[ts(as = "String")]
    pub appointment_date: NaiveDate,
    #[ts(as = "String")]
    pub appointment_time: NaiveTime,
    pub duration_minutes: i64,
    pub status: AppointmentStatus,
    /// Quoted price of record in cents (frozen).
    pub price_cents: i64,
    /// Service cost snapshot in cents (frozen).
    pub cost_cents: i64,
    /// Commission owed to the barber in cents (frozen at booking).
    pub commission_cents: i64,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Returns the quoted price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Net profit contribution once completed: price − cost − commission.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.price_cents - self.cost_cents - self.commission_cents)
    }
}

// =============================================================================
// Session
// =============================================================================

/// One line item inside a session's snapshot of performed services.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionLineItem {
    pub service_id: String,
    /// Service name at session time (frozen).
    pub name: String,
    /// Price charged for this line in cents (frozen).
    pub price_cents: i64,
}

/// A walk-in transaction, recorded already-completed in one atomic step.
///
/// Immutable after creation in the core's contract. `services` holds the
/// line-item snapshot as JSON; use [`Session::line_items`] to decode it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Session {
    pub id: String,
    /// Business number: `SES-YYYYMMDD-NNN`, unique, daily-increasing.
    pub session_number: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub barber_id: String,
    pub barber_name: String,
    /// JSON array of [`SessionLineItem`] snapshots.
    pub services: String,
    pub total_price_cents: i64,
    pub total_cost_cents: i64,
    pub total_commission_cents: i64,
    pub discount_cents: i64,
    pub final_price_cents: i64,
    pub payment_method: PaymentMethod,
    pub loyalty_points_earned: i64,
    pub loyalty_points_used: i64,
    pub status: SessionStatus,
    #[ts(as = "String")]
    pub check_in_time: DateTime<Utc>,
    #[ts(as = "String")]
    pub check_out_time: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Decodes the line-item snapshot.
    pub fn line_items(&self) -> serde_json::Result<Vec<SessionLineItem>> {
        serde_json::from_str(&self.services)
    }

    /// Returns the final charged price as Money.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_cents(self.final_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_rate_from_bps() {
        let rate = CommissionRate::from_bps(3000);
        assert_eq!(rate.bps(), 3000);
        assert!((rate.percentage() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_commission_rate_from_percentage() {
        let rate = CommissionRate::from_percentage(8.0);
        assert_eq!(rate.bps(), 800);
    }

    #[test]
    fn test_commission_rate_default_is_shop_fallback() {
        assert_eq!(CommissionRate::default().bps(), 3000);
    }

    #[test]
    fn test_service_override_zero_means_none() {
        let mut service = sample_service();
        service.commission_rate_bps = Some(0);
        assert!(service.commission_override().is_none());

        service.commission_rate_bps = None;
        assert!(service.commission_override().is_none());

        service.commission_rate_bps = Some(800);
        assert_eq!(service.commission_override().unwrap().bps(), 800);
    }

    #[test]
    fn test_appointment_status_as_str() {
        assert_eq!(AppointmentStatus::Pending.as_str(), "pending");
        assert_eq!(AppointmentStatus::NoShow.as_str(), "no_show");
    }

    #[test]
    fn test_status_transitions() {
        use AppointmentStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        // Terminal states go nowhere
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Pending));

        // Nothing produces no_show
        assert!(!Pending.can_transition_to(NoShow));
        assert!(!Confirmed.can_transition_to(NoShow));
        assert!(NoShow.is_terminal());
    }

    #[test]
    fn test_session_line_items_round_trip() {
        let items = vec![SessionLineItem {
            service_id: "svc-1".to_string(),
            name: "Classic haircut".to_string(),
            price_cents: 4_000,
        }];
        let json = serde_json::to_string(&items).unwrap();

        let session = sample_session(json);
        let decoded = session.line_items().unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "Classic haircut");
        assert_eq!(decoded[0].price_cents, 4_000);
    }

    fn sample_service() -> Service {
        Service {
            id: "svc-1".to_string(),
            name: "Classic haircut".to_string(),
            category: "Haircut".to_string(),
            duration_minutes: 30,
            price_cents: 4_000,
            cost_cents: 500,
            commission_rate_bps: None,
            status: ActiveStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn sample_session(services_json: String) -> Session {
        let now = Utc::now();
        Session {
            id: "ses-id".to_string(),
            session_number: "SES-20260830-001".to_string(),
            customer_id: Some("cus-1".to_string()),
            customer_name: "Ali".to_string(),
            barber_id: "bar-1".to_string(),
            barber_name: "Khalid".to_string(),
            services: services_json,
            total_price_cents: 4_000,
            total_cost_cents: 500,
            total_commission_cents: 1_200,
            discount_cents: 0,
            final_price_cents: 4_000,
            payment_method: PaymentMethod::Cash,
            loyalty_points_earned: 4,
            loyalty_points_used: 0,
            status: SessionStatus::Completed,
            check_in_time: now,
            check_out_time: now,
            created_at: now,
        }
    }
}
