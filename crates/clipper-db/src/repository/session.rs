//! # Session Repository
//!
//! Database operations for walk-in sessions. A session is a completed
//! transaction from the moment it exists: there is no pending state and no
//! status transitions, so this repository is insert-and-read only.
//!
//! ## Line Items
//! The `services` column holds a JSON array of price snapshots. A session
//! may cover several services, but the set never changes after the fact,
//! so a child table would buy nothing over the JSON snapshot.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use clipper_core::Session;

const SELECT_COLUMNS: &str = r#"
    SELECT id, session_number, customer_id, customer_name,
           barber_id, barber_name, services,
           total_price_cents, total_cost_cents, total_commission_cents,
           discount_cents, final_price_cents, payment_method,
           loyalty_points_earned, loyalty_points_used, status,
           check_in_time, check_out_time, created_at
    FROM sessions
"#;

/// Repository for walk-in session database operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Gets a session by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Session>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Gets a session by its human-readable number (SES-YYYYMMDD-NNN).
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<Session>> {
        let sql = format!("{SELECT_COLUMNS} WHERE session_number = ?1");
        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Lists sessions recorded on one day, most recent first.
    ///
    /// Day membership is by the date embedded in the session number, which
    /// matches the date the sequence was allocated under.
    pub async fn list_for_date(&self, date: NaiveDate) -> DbResult<Vec<Session>> {
        let pattern = format!("SES-{}-%", date.format("%Y%m%d"));
        let sql = format!(
            "{SELECT_COLUMNS} WHERE session_number LIKE ?1 ORDER BY check_out_time DESC"
        );
        let sessions = sqlx::query_as::<_, Session>(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(sessions)
    }

    /// Lists the most recently recorded sessions.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Session>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ?1");
        let sessions = sqlx::query_as::<_, Session>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(sessions)
    }
}

// =============================================================================
// Connection-level helpers (transaction composition)
// =============================================================================

/// Inserts a fully-populated session row.
pub async fn insert(conn: &mut SqliteConnection, session: &Session) -> DbResult<()> {
    debug!(
        id = %session.id,
        number = %session.session_number,
        "Inserting session"
    );

    sqlx::query(
        r#"
        INSERT INTO sessions (
            id, session_number, customer_id, customer_name,
            barber_id, barber_name, services,
            total_price_cents, total_cost_cents, total_commission_cents,
            discount_cents, final_price_cents, payment_method,
            loyalty_points_earned, loyalty_points_used, status,
            check_in_time, check_out_time, created_at
        ) VALUES (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7,
            ?8, ?9, ?10,
            ?11, ?12, ?13,
            ?14, ?15, ?16,
            ?17, ?18, ?19
        )
        "#,
    )
    .bind(&session.id)
    .bind(&session.session_number)
    .bind(&session.customer_id)
    .bind(&session.customer_name)
    .bind(&session.barber_id)
    .bind(&session.barber_name)
    .bind(&session.services)
    .bind(session.total_price_cents)
    .bind(session.total_cost_cents)
    .bind(session.total_commission_cents)
    .bind(session.discount_cents)
    .bind(session.final_price_cents)
    .bind(session.payment_method)
    .bind(session.loyalty_points_earned)
    .bind(session.loyalty_points_used)
    .bind(session.status)
    .bind(session.check_in_time)
    .bind(session.check_out_time)
    .bind(session.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Counts sessions whose number starts with the given prefix.
///
/// Drives the daily sequence: the next number for a day is count + 1.
pub async fn count_with_number_prefix(conn: &mut SqliteConnection, prefix: &str) -> DbResult<i64> {
    let pattern = format!("{prefix}%");
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE session_number LIKE ?1")
            .bind(&pattern)
            .fetch_one(&mut *conn)
            .await?;

    Ok(count)
}
