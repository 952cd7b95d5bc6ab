//! # Service Repository
//!
//! Database operations for the service catalogue (haircuts, beard trims,
//! treatments). Prices here are list prices; the amount actually charged is
//! frozen into the appointment/session row at booking time.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use clipper_core::{ActiveStatus, Service};

/// Input for creating a catalogue entry.
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub category: String,
    pub duration_minutes: i64,
    pub price_cents: i64,
    pub cost_cents: i64,
    /// Per-service commission override in basis points.
    /// `None` means the barber's own rate applies.
    pub commission_rate_bps: Option<u32>,
}

/// Repository for service catalogue operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    /// Adds a service to the catalogue.
    pub async fn create(&self, new: NewService) -> DbResult<Service> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now();

        debug!(id = %id, name = %new.name, "Creating service");

        sqlx::query(
            r#"
            INSERT INTO services (
                id, name, category, duration_minutes,
                price_cents, cost_cents, commission_rate_bps,
                status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'active', ?8)
            "#,
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.duration_minutes)
        .bind(new.price_cents)
        .bind(new.cost_cents)
        .bind(new.commission_rate_bps)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Service {
            id,
            name: new.name,
            category: new.category,
            duration_minutes: new.duration_minutes,
            price_cents: new.price_cents,
            cost_cents: new.cost_cents,
            commission_rate_bps: new.commission_rate_bps,
            status: ActiveStatus::Active,
            created_at: now,
        })
    }

    /// Gets a service by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, name, category, duration_minutes,
                   price_cents, cost_cents, commission_rate_bps,
                   status, created_at
            FROM services
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// Lists bookable services, grouped by category.
    pub async fn list_active(&self) -> DbResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, name, category, duration_minutes,
                   price_cents, cost_cents, commission_rate_bps,
                   status, created_at
            FROM services
            WHERE status = 'active'
            ORDER BY category, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Lists the whole catalogue including retired services.
    pub async fn list_all(&self) -> DbResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, name, category, duration_minutes,
                   price_cents, cost_cents, commission_rate_bps,
                   status, created_at
            FROM services
            ORDER BY category, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Updates list price and cost for a service.
    pub async fn update_pricing(
        &self,
        id: &str,
        price_cents: i64,
        cost_cents: i64,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE services SET price_cents = ?2, cost_cents = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price_cents)
        .bind(cost_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", id));
        }

        Ok(())
    }

    /// Retires or reactivates a catalogue entry.
    pub async fn set_status(&self, id: &str, status: ActiveStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE services SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", id));
        }

        Ok(())
    }
}

// =============================================================================
// Connection-level helpers (transaction composition)
// =============================================================================

/// Gets a service by ID on an existing connection.
pub async fn get_by_id(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, category, duration_minutes,
               price_cents, cost_cents, commission_rate_bps,
               status, created_at
        FROM services
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(service)
}
