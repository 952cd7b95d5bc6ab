//! # Customer Repository
//!
//! Database operations for customer identity and running ledger totals.
//!
//! ## Running Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Customer Ledger Fields                            │
//! │                                                                         │
//! │  loyalty_points     ← earned on every paid visit (1 pt / 10.00 spent)   │
//! │  total_visits       ← incremented once per completed visit              │
//! │  total_spent_cents  ← final paid amount accumulates here                │
//! │  last_visit         ← timestamp of the most recent paid visit           │
//! │                                                                         │
//! │  These are only ever written through credit_visit() inside the same     │
//! │  transaction that persists the appointment/session row.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use clipper_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Registers a new customer.
    ///
    /// ## Errors
    /// Returns [`DbError::DuplicatePhone`] when the phone number is already
    /// registered, carrying the offending phone.
    pub async fn create(&self, name: &str, phone: &str) -> DbResult<Customer> {
        let mut conn = self.pool.acquire().await?;
        insert(&mut conn, name, phone).await
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, loyalty_points, total_visits,
                   total_spent_cents, created_at, last_visit
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Looks up a customer by exact phone number.
    ///
    /// Phone is the natural key for identity resolution: walk-ins give their
    /// phone number, not an ID.
    pub async fn find_by_phone(&self, phone: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, loyalty_points, total_visits,
                   total_spent_cents, created_at, last_visit
            FROM customers
            WHERE phone = ?1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Searches customers by name or phone substring.
    pub async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<Customer>> {
        let pattern = format!("%{}%", query);

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, loyalty_points, total_visits,
                   total_spent_cents, created_at, last_visit
            FROM customers
            WHERE name LIKE ?1 OR phone LIKE ?1
            ORDER BY name
            LIMIT ?2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Lists all customers, most recently registered first.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, loyalty_points, total_visits,
                   total_spent_cents, created_at, last_visit
            FROM customers
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Updates a customer's name and phone.
    pub async fn update_profile(&self, id: &str, name: &str, phone: &str) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE customers SET name = ?2, phone = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_phone(phone))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Deletes a customer.
    ///
    /// Appointment rows keep their name/phone snapshots, so history survives
    /// the delete; their customer_id is set NULL by the FK action.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

// =============================================================================
// Connection-level helpers (transaction composition)
// =============================================================================

/// Inserts a new customer on an existing connection.
///
/// Used by the engines so customer creation participates in the caller's
/// transaction: if the rest of the write fails, the customer row rolls back.
pub async fn insert(conn: &mut SqliteConnection, name: &str, phone: &str) -> DbResult<Customer> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    debug!(id = %id, phone = %phone, "Inserting customer");

    sqlx::query(
        r#"
        INSERT INTO customers (
            id, name, phone, loyalty_points, total_visits,
            total_spent_cents, created_at, last_visit
        ) VALUES (?1, ?2, ?3, 0, 0, 0, ?4, NULL)
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(phone)
    .bind(now)
    .execute(&mut *conn)
    .await
    .map_err(|e| DbError::from(e).with_phone(phone))?;

    Ok(Customer {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        loyalty_points: 0,
        total_visits: 0,
        total_spent_cents: 0,
        created_at: now,
        last_visit: None,
    })
}

/// Looks up a customer by phone on an existing connection.
pub async fn find_by_phone(
    conn: &mut SqliteConnection,
    phone: &str,
) -> DbResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, phone, loyalty_points, total_visits,
               total_spent_cents, created_at, last_visit
        FROM customers
        WHERE phone = ?1
        "#,
    )
    .bind(phone)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(customer)
}

/// Credits a paid visit to the customer's running totals.
///
/// Adds loyalty points and spend, bumps the visit count, and stamps
/// `last_visit`. Must run in the same transaction as the row that
/// represents the visit.
pub async fn credit_visit(
    conn: &mut SqliteConnection,
    customer_id: &str,
    spent_cents: i64,
    points_earned: i64,
    visited_at: DateTime<Utc>,
) -> DbResult<()> {
    debug!(
        customer_id = %customer_id,
        spent_cents,
        points_earned,
        "Crediting visit"
    );

    let result = sqlx::query(
        r#"
        UPDATE customers SET
            loyalty_points = loyalty_points + ?2,
            total_visits = total_visits + 1,
            total_spent_cents = total_spent_cents + ?3,
            last_visit = ?4
        WHERE id = ?1
        "#,
    )
    .bind(customer_id)
    .bind(points_earned)
    .bind(spent_cents)
    .bind(visited_at)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Customer", customer_id));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn duplicate_phone_is_rejected_and_named() {
        let db = test_db().await;

        db.customers().create("Ali Hassan", "0551112222").await.unwrap();
        let err = db
            .customers()
            .create("Someone Else", "0551112222")
            .await
            .unwrap_err();

        match err {
            DbError::DuplicatePhone { phone } => assert_eq!(phone, "0551112222"),
            other => panic!("expected DuplicatePhone, got {other:?}"),
        }

        // The failed insert must not leave a second row behind
        assert_eq!(db.customers().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_matches_name_and_phone() {
        let db = test_db().await;

        db.customers().create("Ali Hassan", "0551112222").await.unwrap();
        db.customers().create("Omar Saleh", "0553334444").await.unwrap();

        let by_name = db.customers().search("ali", 10).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Ali Hassan");

        let by_phone = db.customers().search("3334", 10).await.unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Omar Saleh");
    }
}
