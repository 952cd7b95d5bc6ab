//! # Appointment Repository
//!
//! Database operations for scheduled appointments.
//!
//! ## Status State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   pending ──► confirmed ──► completed                                   │
//! │      │            │                                                     │
//! │      └────────────┴───────► cancelled                                   │
//! │                                                                         │
//! │   (completed and cancelled are terminal)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transition legality is decided by [`clipper_core::AppointmentStatus`];
//! this module only persists the outcome. All status writes take a
//! connection so the booking engine can bundle them with ledger credits.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use clipper_core::{Appointment, AppointmentStatus};

const SELECT_COLUMNS: &str = r#"
    SELECT id, appointment_number, customer_id, customer_name, phone,
           barber_id, barber_name, service_id, service_name,
           appointment_date, appointment_time, duration_minutes, status,
           price_cents, cost_cents, commission_cents,
           payment_method, payment_status, notes, created_at, completed_at
    FROM appointments
"#;

/// Repository for appointment database operations.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    pool: SqlitePool,
}

impl AppointmentRepository {
    /// Creates a new AppointmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AppointmentRepository { pool }
    }

    /// Gets an appointment by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Appointment>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let appointment = sqlx::query_as::<_, Appointment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(appointment)
    }

    /// Gets an appointment by its human-readable number (APP-YYYYMMDD-NNN).
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<Appointment>> {
        let sql = format!("{SELECT_COLUMNS} WHERE appointment_number = ?1");
        let appointment = sqlx::query_as::<_, Appointment>(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(appointment)
    }

    /// Lists the schedule for one day, in time order.
    pub async fn list_for_date(&self, date: NaiveDate) -> DbResult<Vec<Appointment>> {
        let sql = format!("{SELECT_COLUMNS} WHERE appointment_date = ?1 ORDER BY appointment_time");
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    /// Lists the schedule for one day, filtered by a case-insensitive
    /// substring match on customer name, phone, or appointment number.
    pub async fn search_for_date(
        &self,
        date: NaiveDate,
        query: &str,
    ) -> DbResult<Vec<Appointment>> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            r#"{SELECT_COLUMNS}
            WHERE appointment_date = ?1
              AND (customer_name LIKE ?2 OR phone LIKE ?2 OR appointment_number LIKE ?2)
            ORDER BY appointment_time"#
        );
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(date)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    /// Lists the schedule for one day filtered to a single status.
    pub async fn list_for_date_with_status(
        &self,
        date: NaiveDate,
        status: AppointmentStatus,
    ) -> DbResult<Vec<Appointment>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE appointment_date = ?1 AND status = ?2 ORDER BY appointment_time"
        );
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(date)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    /// Lists the most recently created appointments.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Appointment>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ?1");
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }
}

// =============================================================================
// Connection-level helpers (transaction composition)
// =============================================================================

/// Inserts a fully-populated appointment row.
pub async fn insert(conn: &mut SqliteConnection, appointment: &Appointment) -> DbResult<()> {
    debug!(
        id = %appointment.id,
        number = %appointment.appointment_number,
        "Inserting appointment"
    );

    sqlx::query(
        r#"
        INSERT INTO appointments (
            id, appointment_number, customer_id, customer_name, phone,
            barber_id, barber_name, service_id, service_name,
            appointment_date, appointment_time, duration_minutes, status,
            price_cents, cost_cents, commission_cents,
            payment_method, payment_status, notes, created_at, completed_at
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5,
            ?6, ?7, ?8, ?9,
            ?10, ?11, ?12, ?13,
            ?14, ?15, ?16,
            ?17, ?18, ?19, ?20, ?21
        )
        "#,
    )
    .bind(&appointment.id)
    .bind(&appointment.appointment_number)
    .bind(&appointment.customer_id)
    .bind(&appointment.customer_name)
    .bind(&appointment.phone)
    .bind(&appointment.barber_id)
    .bind(&appointment.barber_name)
    .bind(&appointment.service_id)
    .bind(&appointment.service_name)
    .bind(appointment.appointment_date)
    .bind(appointment.appointment_time)
    .bind(appointment.duration_minutes)
    .bind(appointment.status)
    .bind(appointment.price_cents)
    .bind(appointment.cost_cents)
    .bind(appointment.commission_cents)
    .bind(appointment.payment_method)
    .bind(appointment.payment_status)
    .bind(&appointment.notes)
    .bind(appointment.created_at)
    .bind(appointment.completed_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Gets an appointment by ID on an existing connection.
///
/// Used by the booking engine to read the current status inside the same
/// transaction that will write the transition.
pub async fn get_by_id(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Appointment>> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
    let appointment = sqlx::query_as::<_, Appointment>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(appointment)
}

/// Writes a bare status transition (pending→confirmed, →cancelled).
pub async fn set_status(
    conn: &mut SqliteConnection,
    id: &str,
    status: AppointmentStatus,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE appointments SET status = ?2 WHERE id = ?1")
        .bind(id)
        .bind(status)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Appointment", id));
    }

    Ok(())
}

/// Marks an appointment completed and paid.
///
/// The payment method was captured at booking time; completion only flips
/// the paid flag and stamps the completion timestamp.
pub async fn mark_completed(
    conn: &mut SqliteConnection,
    id: &str,
    completed_at: DateTime<Utc>,
) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE appointments SET
            status = 'completed',
            payment_status = 'paid',
            completed_at = ?2
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(completed_at)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Appointment", id));
    }

    Ok(())
}

/// Hard-deletes an appointment row, whatever its status.
pub async fn delete(conn: &mut SqliteConnection, id: &str) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Appointment", id));
    }

    Ok(())
}

/// Counts appointments whose number starts with the given prefix.
///
/// Drives the daily sequence: the next number for a day is count + 1.
pub async fn count_with_number_prefix(conn: &mut SqliteConnection, prefix: &str) -> DbResult<i64> {
    let pattern = format!("{prefix}%");
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointments WHERE appointment_number LIKE ?1",
    )
    .bind(&pattern)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}
