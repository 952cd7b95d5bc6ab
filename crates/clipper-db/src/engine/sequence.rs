//! # Daily Reference Sequence
//!
//! Human-readable reference numbers, unique per kind per calendar day:
//!
//! ```text
//! APP-20260830-001   first appointment booked on 2026-08-30
//! APP-20260830-002   second
//! SES-20260830-001   first walk-in session that day
//! ```
//!
//! ## Allocation
//! Count existing rows whose number carries today's prefix, add one,
//! zero-pad to three digits. The count is read on the caller's transaction
//! connection, so number allocation and row insert commit together.
//!
//! A concurrent writer on another connection can still observe the same
//! count; the UNIQUE column on the number catches the collision and the
//! engines re-allocate and retry. See [`crate::engine::booking`].

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::engine::EngineResult;
use crate::repository::{appointment, session};
use clipper_core::{CoreError, MAX_DAILY_SEQUENCE};

/// Which table the reference number identifies a row in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Appointment,
    Session,
}

impl ReferenceKind {
    /// Reference number prefix for this kind.
    pub const fn prefix(&self) -> &'static str {
        match self {
            ReferenceKind::Appointment => "APP",
            ReferenceKind::Session => "SES",
        }
    }
}

/// Allocates the next reference number for `kind` on `date`.
///
/// Must be called on the same connection (transaction) that will insert the
/// numbered row.
///
/// ## Errors
/// [`CoreError::SequenceExhausted`] once a day already holds 999 numbers;
/// the 3-digit suffix cannot express a 1000th.
pub async fn next_reference(
    conn: &mut SqliteConnection,
    kind: ReferenceKind,
    date: NaiveDate,
) -> EngineResult<String> {
    let day = date.format("%Y%m%d").to_string();
    let prefix = format!("{}-{}-", kind.prefix(), day);

    let count = match kind {
        ReferenceKind::Appointment => {
            appointment::count_with_number_prefix(conn, &prefix).await?
        }
        ReferenceKind::Session => session::count_with_number_prefix(conn, &prefix).await?,
    };

    let next = count + 1;
    if next > MAX_DAILY_SEQUENCE {
        return Err(CoreError::SequenceExhausted {
            prefix: kind.prefix().to_string(),
            date: day,
        }
        .into());
    }

    Ok(format!("{prefix}{next:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::pool::{Database, DbConfig};
    use crate::test_support::{seed_barber, seed_service, test_db};

    #[test]
    fn prefixes() {
        assert_eq!(ReferenceKind::Appointment.prefix(), "APP");
        assert_eq!(ReferenceKind::Session.prefix(), "SES");
    }

    #[tokio::test]
    async fn first_number_of_the_day() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        let number = next_reference(&mut conn, ReferenceKind::Appointment, date)
            .await
            .unwrap();
        assert_eq!(number, "APP-20260830-001");

        let number = next_reference(&mut conn, ReferenceKind::Session, date)
            .await
            .unwrap();
        assert_eq!(number, "SES-20260830-001");
    }

    #[tokio::test]
    async fn thousandth_number_of_a_day_is_refused() {
        let db = test_db().await;
        let barber = seed_barber(&db, 3000).await;
        let service = seed_service(&db, 4_000, 300, None).await;
        let date = NaiveDate::from_ymd_opt(2030, 1, 15).unwrap();

        // Fill the day to its 3-digit capacity
        sqlx::query(
            r#"
            WITH RECURSIVE seq(n) AS (
                SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < 999
            )
            INSERT INTO appointments (
                id, appointment_number, customer_name, phone,
                barber_id, barber_name, service_id, service_name,
                appointment_date, appointment_time, duration_minutes,
                price_cents, created_at
            )
            SELECT
                'fill-' || n,
                'APP-20300115-' || printf('%03d', n),
                'Fill', '0500000000',
                ?1, 'Khalid Mohammed', ?2, 'Classic Haircut',
                '2030-01-15', '10:00:00', 30,
                4000, datetime('now')
            FROM seq
            "#,
        )
        .bind(&barber.id)
        .bind(&service.id)
        .execute(db.pool())
        .await
        .unwrap();

        let mut conn = db.pool().acquire().await.unwrap();
        let err = next_reference(&mut conn, ReferenceKind::Appointment, date)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::SequenceExhausted { .. })
        ));

        // Same day, other kind is its own sequence and still has room
        let number = next_reference(&mut conn, ReferenceKind::Session, date)
            .await
            .unwrap();
        assert_eq!(number, "SES-20300115-001");
    }
}
