//! # Booking Engine
//!
//! Appointment lifecycle orchestration.
//!
//! ## Create Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_appointment(request)                                            │
//! │                                                                         │
//! │  1. Validate name/phone                                                 │
//! │  2. BEGIN TRANSACTION                                                   │
//! │  3. Resolve-or-create Customer by phone                                 │
//! │  4. Load Barber + Service (NotFound on bad id)                          │
//! │  5. Resolve pricing: cost + commission snapshot                         │
//! │  6. Allocate APP-YYYYMMDD-NNN                                           │
//! │  7. INSERT appointment (pending, unpaid)                                │
//! │  8. COMMIT                                                              │
//! │                                                                         │
//! │  A UNIQUE collision on the number rolls everything back and the         │
//! │  whole transaction is retried with a fresh number.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregates (customer loyalty/spend) move only on completion, never at
//! booking time. Cancellation has no financial side effects.

use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::sequence::{next_reference, ReferenceKind};
use crate::engine::{EngineError, EngineResult, REFERENCE_RETRY_ATTEMPTS};
use crate::error::DbError;
use crate::pool::Database;
use crate::repository::{appointment, barber, customer, service};
use clipper_core::{
    resolve_pricing, validation, Appointment, AppointmentStatus, Barber, CoreError, Customer,
    Money, PaymentMethod, PaymentStatus, Service,
};

/// Input for booking an appointment.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub customer_name: String,
    pub phone: String,
    pub barber_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Price of record in cents. `None` takes the catalogue list price;
    /// a value quotes a manual price, which is trusted as-is.
    pub price_cents: Option<i64>,
    /// How the customer intends to pay. Recorded now, settled on completion.
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

/// Orchestrates the appointment state machine over one database handle.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    db: Database,
}

impl BookingEngine {
    /// Creates a booking engine over the given database.
    pub fn new(db: Database) -> Self {
        BookingEngine { db }
    }

    /// Books a new appointment, returning the stored record.
    ///
    /// Resolves the customer by phone (creating one on first contact),
    /// freezes pricing and commission into the row, and assigns the next
    /// daily reference number. The appointment starts `pending`/`unpaid`.
    pub async fn create_appointment(&self, request: NewAppointment) -> EngineResult<Appointment> {
        validation::validate_customer_name(&request.customer_name)?;
        validation::validate_phone(&request.phone)?;
        if let Some(cents) = request.price_cents {
            validation::validate_price_cents(cents)?;
        }

        let mut attempt = 1;
        loop {
            match self.try_create(&request).await {
                Err(err) if err.is_reference_conflict() && attempt < REFERENCE_RETRY_ATTEMPTS => {
                    warn!(attempt, "Appointment number collision, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn try_create(&self, request: &NewAppointment) -> EngineResult<Appointment> {
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let cust = resolve_or_create_customer(&mut tx, &request.customer_name, &request.phone)
            .await?;
        let (barber, service) =
            load_barber_and_service(&mut tx, &request.barber_id, &request.service_id).await?;

        let quoted = Money::from_cents(request.price_cents.unwrap_or(service.price_cents));
        let breakdown = resolve_pricing(&service, &barber, quoted);

        // Numbers run by booking day, not visit day: a booking made today
        // for next week still takes the next APP-{today}-NNN slot.
        let now = Utc::now();
        let number = next_reference(&mut tx, ReferenceKind::Appointment, now.date_naive()).await?;

        let record = Appointment {
            id: Uuid::new_v4().to_string(),
            appointment_number: number,
            customer_id: Some(cust.id),
            customer_name: request.customer_name.clone(),
            phone: request.phone.clone(),
            barber_id: barber.id.clone(),
            barber_name: barber.name.clone(),
            service_id: service.id.clone(),
            service_name: service.name.clone(),
            appointment_date: request.date,
            appointment_time: request.time,
            duration_minutes: service.duration_minutes,
            status: AppointmentStatus::Pending,
            price_cents: quoted.cents(),
            cost_cents: breakdown.cost_cents,
            commission_cents: breakdown.commission_cents,
            payment_method: request.payment_method,
            payment_status: PaymentStatus::Unpaid,
            notes: request.notes.clone(),
            created_at: now,
            completed_at: None,
        };

        appointment::insert(&mut tx, &record).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(
            number = %record.appointment_number,
            barber = %record.barber_name,
            "Appointment booked"
        );

        Ok(record)
    }

    /// Confirms a pending appointment.
    pub async fn confirm(&self, id: &str) -> EngineResult<()> {
        self.transition(id, AppointmentStatus::Confirmed, "confirm").await
    }

    /// Cancels a pending or confirmed appointment. No financial side effects.
    pub async fn cancel(&self, id: &str) -> EngineResult<()> {
        self.transition(id, AppointmentStatus::Cancelled, "cancel").await
    }

    async fn transition(
        &self,
        id: &str,
        next: AppointmentStatus,
        verb: &str,
    ) -> EngineResult<()> {
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let current = require_appointment(&mut tx, id).await?;
        check_transition(&current, next, verb)?;

        appointment::set_status(&mut tx, id, next).await?;
        tx.commit().await.map_err(DbError::from)?;

        debug!(id = %id, status = next.as_str(), "Appointment transitioned");
        Ok(())
    }

    /// Completes an appointment: marks it paid, stamps the completion time,
    /// and credits the linked customer with the visit, spend, and loyalty
    /// points in the same transaction.
    ///
    /// Appointments without a linked customer (imported or anonymised rows)
    /// complete without the credit.
    pub async fn complete(&self, id: &str) -> EngineResult<Appointment> {
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let record = require_appointment(&mut tx, id).await?;
        check_transition(&record, AppointmentStatus::Completed, "complete")?;

        let now = Utc::now();
        appointment::mark_completed(&mut tx, id, now).await?;

        if let Some(customer_id) = &record.customer_id {
            let points = record.price().loyalty_points();
            customer::credit_visit(&mut tx, customer_id, record.price_cents, points, now).await?;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(number = %record.appointment_number, "Appointment completed");

        Ok(Appointment {
            status: AppointmentStatus::Completed,
            payment_status: PaymentStatus::Paid,
            completed_at: Some(now),
            ..record
        })
    }

    /// Hard-deletes an appointment regardless of status. Irreversible;
    /// bypasses the state machine. Admin surface only.
    pub async fn delete(&self, id: &str) -> EngineResult<()> {
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;
        appointment::delete(&mut tx, id).await?;
        tx.commit().await.map_err(DbError::from)?;

        warn!(id = %id, "Appointment hard-deleted");
        Ok(())
    }

    /// Lists the schedule for a day, optionally filtered by a
    /// case-insensitive substring of customer name, phone, or number.
    pub async fn list_for_date(
        &self,
        date: NaiveDate,
        filter: Option<&str>,
    ) -> EngineResult<Vec<Appointment>> {
        let repo = self.db.appointments();
        let appointments = match filter {
            Some(query) if !query.trim().is_empty() => {
                let query = validation::validate_search_query(query)?;
                repo.search_for_date(date, &query).await?
            }
            _ => repo.list_for_date(date).await?,
        };

        Ok(appointments)
    }
}

// =============================================================================
// Shared helpers (also used by the walk-in engine)
// =============================================================================

/// Resolves a customer by phone, creating one on first contact.
///
/// Runs on the caller's transaction: a later failure rolls the new
/// customer back, so no orphan identities are left behind.
pub(crate) async fn resolve_or_create_customer(
    conn: &mut SqliteConnection,
    name: &str,
    phone: &str,
) -> EngineResult<Customer> {
    match customer::find_by_phone(conn, phone).await? {
        Some(existing) => Ok(existing),
        None => {
            debug!(phone = %phone, "First contact, creating customer");
            Ok(customer::insert(conn, name, phone).await?)
        }
    }
}

/// Loads the barber and service for a booking, failing `NotFound` on a
/// bad id.
pub(crate) async fn load_barber_and_service(
    conn: &mut SqliteConnection,
    barber_id: &str,
    service_id: &str,
) -> EngineResult<(Barber, Service)> {
    let barber = barber::get_by_id(conn, barber_id)
        .await?
        .ok_or_else(|| DbError::not_found("Barber", barber_id))?;
    let service = service::get_by_id(conn, service_id)
        .await?
        .ok_or_else(|| DbError::not_found("Service", service_id))?;

    Ok((barber, service))
}

async fn require_appointment(
    tx: &mut Transaction<'_, Sqlite>,
    id: &str,
) -> EngineResult<Appointment> {
    appointment::get_by_id(tx, id)
        .await?
        .ok_or_else(|| DbError::not_found("Appointment", id).into())
}

fn check_transition(
    record: &Appointment,
    next: AppointmentStatus,
    verb: &str,
) -> EngineResult<()> {
    if !record.status.can_transition_to(next) {
        return Err(CoreError::InvalidTransition {
            id: record.id.clone(),
            current: record.status.as_str().to_string(),
            attempted: verb.to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
