//! # Settings Repository
//!
//! Flat key/value shop configuration (shop name, working hours, tax rate).
//! Defaults are seeded by migration; this repository reads and upserts.

use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use crate::error::DbResult;

/// Repository for shop settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Gets a single setting value.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Gets a single setting value, falling back to a default when the key
    /// is absent.
    pub async fn get_or(&self, key: &str, default: &str) -> DbResult<String> {
        Ok(self.get(key).await?.unwrap_or_else(|| default.to_string()))
    }

    /// Gets all settings as a map.
    pub async fn get_all(&self) -> DbResult<HashMap<String, String>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM settings ORDER BY key")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().collect())
    }

    /// Sets a setting value, inserting or overwriting.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Updating setting");

        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::test_db;

    #[tokio::test]
    async fn migration_defaults_are_readable() {
        let db = test_db().await;

        let name = db.settings().get("shop_name").await.unwrap();
        assert_eq!(name.as_deref(), Some("Clipper Barbershop"));

        let all = db.settings().get_all().await.unwrap();
        assert_eq!(all.get("tax_rate").map(String::as_str), Some("15"));
    }

    #[tokio::test]
    async fn get_or_falls_back_for_missing_keys() {
        let db = test_db().await;

        let known = db.settings().get_or("tax_rate", "0").await.unwrap();
        assert_eq!(known, "15");

        let missing = db.settings().get_or("receipt_footer", "Thank you").await.unwrap();
        assert_eq!(missing, "Thank you");
        // A fallback read never writes the key
        assert!(db.settings().get("receipt_footer").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_overwrites_and_get_sees_it() {
        let db = test_db().await;

        db.settings().set("shop_name", "Clipper Downtown").await.unwrap();
        let name = db.settings().get("shop_name").await.unwrap();
        assert_eq!(name.as_deref(), Some("Clipper Downtown"));
    }
}
