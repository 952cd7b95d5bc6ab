//! # Barber Repository
//!
//! Database operations for the barber roster and per-barber ledger totals.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use clipper_core::{ActiveStatus, Barber, DEFAULT_COMMISSION_RATE_BPS};

/// Repository for barber database operations.
#[derive(Debug, Clone)]
pub struct BarberRepository {
    pool: SqlitePool,
}

impl BarberRepository {
    /// Creates a new BarberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BarberRepository { pool }
    }

    /// Adds a barber to the roster.
    ///
    /// ## Arguments
    /// * `commission_rate_bps` - Commission in basis points, or `None` for
    ///   the shop default (3000 = 30%).
    pub async fn create(
        &self,
        name: &str,
        phone: &str,
        commission_rate_bps: Option<u32>,
    ) -> DbResult<Barber> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now();
        let rate = commission_rate_bps.unwrap_or(DEFAULT_COMMISSION_RATE_BPS);

        debug!(id = %id, name = %name, rate_bps = rate, "Creating barber");

        sqlx::query(
            r#"
            INSERT INTO barbers (
                id, name, phone, commission_rate_bps, status,
                total_services, total_revenue_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, 'active', 0, 0, ?5)
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(phone)
        .bind(rate)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Barber {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            commission_rate_bps: rate,
            status: ActiveStatus::Active,
            total_services: 0,
            total_revenue_cents: 0,
            created_at: now,
        })
    }

    /// Gets a barber by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Barber>> {
        let barber = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, name, phone, commission_rate_bps, status,
                   total_services, total_revenue_cents, created_at
            FROM barbers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(barber)
    }

    /// Lists barbers available for booking.
    pub async fn list_active(&self) -> DbResult<Vec<Barber>> {
        let barbers = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, name, phone, commission_rate_bps, status,
                   total_services, total_revenue_cents, created_at
            FROM barbers
            WHERE status = 'active'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(barbers)
    }

    /// Lists the whole roster including inactive barbers.
    pub async fn list_all(&self) -> DbResult<Vec<Barber>> {
        let barbers = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, name, phone, commission_rate_bps, status,
                   total_services, total_revenue_cents, created_at
            FROM barbers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(barbers)
    }

    /// Updates a barber's commission rate.
    ///
    /// Only affects future pricing resolution; commissions already frozen
    /// into appointment/session rows are untouched.
    pub async fn set_commission_rate(&self, id: &str, rate_bps: u32) -> DbResult<()> {
        let result = sqlx::query("UPDATE barbers SET commission_rate_bps = ?2 WHERE id = ?1")
            .bind(id)
            .bind(rate_bps)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Barber", id));
        }

        Ok(())
    }

    /// Activates or deactivates a barber.
    pub async fn set_status(&self, id: &str, status: ActiveStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE barbers SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Barber", id));
        }

        Ok(())
    }
}

// =============================================================================
// Connection-level helpers (transaction composition)
// =============================================================================

/// Gets a barber by ID on an existing connection.
pub async fn get_by_id(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Barber>> {
    let barber = sqlx::query_as::<_, Barber>(
        r#"
        SELECT id, name, phone, commission_rate_bps, status,
               total_services, total_revenue_cents, created_at
        FROM barbers
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(barber)
}

/// Credits completed work to the barber's running totals.
///
/// Must run in the same transaction as the row that represents the work.
pub async fn credit_service(
    conn: &mut SqliteConnection,
    barber_id: &str,
    revenue_cents: i64,
) -> DbResult<()> {
    debug!(barber_id = %barber_id, revenue_cents, "Crediting barber service");

    let result = sqlx::query(
        r#"
        UPDATE barbers SET
            total_services = total_services + 1,
            total_revenue_cents = total_revenue_cents + ?2
        WHERE id = ?1
        "#,
    )
    .bind(barber_id)
    .bind(revenue_cents)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Barber", barber_id));
    }

    Ok(())
}
