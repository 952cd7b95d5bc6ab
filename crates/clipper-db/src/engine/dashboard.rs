//! # Dashboard Aggregator
//!
//! Same-day summary figures for the front desk. Pure read side: four
//! independent queries over the appointments of one date, recomputed on
//! every call. No caching, no writes, safe at any frequency.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::engine::EngineResult;
use crate::pool::Database;

/// One day's headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Distinct customers across the day's non-cancelled appointments.
    pub customer_count: i64,
    /// Revenue: sum of price over completed appointments, in cents.
    pub revenue_cents: i64,
    /// All appointments of the day, any status.
    pub appointment_count: i64,
    /// Net profit: sum of (price - cost - commission) over completed
    /// appointments, in cents.
    pub profit_cents: i64,
}

/// Read-only daily aggregates over the appointment ledger.
#[derive(Debug, Clone)]
pub struct Dashboard {
    db: Database,
}

impl Dashboard {
    /// Creates a dashboard over the given database.
    pub fn new(db: Database) -> Self {
        Dashboard { db }
    }

    /// Computes the summary for today (wall-clock date).
    pub async fn summary_today(&self) -> EngineResult<DashboardSummary> {
        self.summary(Utc::now().date_naive()).await
    }

    /// Computes the summary for one date.
    pub async fn summary(&self, date: NaiveDate) -> EngineResult<DashboardSummary> {
        let pool = self.db.pool();

        // Distinct identity, not row count: one customer with three bookings
        // is still one customer. Cancelled bookings don't count as served.
        let customer_count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT COALESCE(customer_id, phone))
            FROM appointments
            WHERE appointment_date = ?1 AND status != 'cancelled'
            "#,
        )
        .bind(date)
        .fetch_one(pool)
        .await
        .map_err(crate::error::DbError::from)?;

        let revenue_cents: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(price_cents)
            FROM appointments
            WHERE appointment_date = ?1 AND status = 'completed'
            "#,
        )
        .bind(date)
        .fetch_one(pool)
        .await
        .map_err(crate::error::DbError::from)?;

        let appointment_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM appointments WHERE appointment_date = ?1",
        )
        .bind(date)
        .fetch_one(pool)
        .await
        .map_err(crate::error::DbError::from)?;

        let profit_cents: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(price_cents - cost_cents - commission_cents)
            FROM appointments
            WHERE appointment_date = ?1 AND status = 'completed'
            "#,
        )
        .bind(date)
        .fetch_one(pool)
        .await
        .map_err(crate::error::DbError::from)?;

        Ok(DashboardSummary {
            customer_count,
            revenue_cents: revenue_cents.unwrap_or(0),
            appointment_count,
            profit_cents: profit_cents.unwrap_or(0),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::booking::{BookingEngine, NewAppointment};
    use crate::test_support::{seed_barber, seed_service, test_db};
    use chrono::NaiveTime;
    use clipper_core::PaymentMethod;

    fn request(
        barber_id: &str,
        service_id: &str,
        name: &str,
        phone: &str,
        date: NaiveDate,
    ) -> NewAppointment {
        NewAppointment {
            customer_name: name.to_string(),
            phone: phone.to_string(),
            barber_id: barber_id.to_string(),
            service_id: service_id.to_string(),
            date,
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            price_cents: None,
            payment_method: Some(PaymentMethod::Cash),
            notes: None,
        }
    }

    #[tokio::test]
    async fn empty_day_reports_zeros() {
        let db = test_db().await;
        let dashboard = Dashboard::new(db);

        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let summary = dashboard.summary(date).await.unwrap();

        assert_eq!(
            summary,
            DashboardSummary {
                customer_count: 0,
                revenue_cents: 0,
                appointment_count: 0,
                profit_cents: 0,
            }
        );
    }

    #[tokio::test]
    async fn completed_and_cancelled_split_correctly() {
        let db = test_db().await;
        let barber = seed_barber(&db, 3000).await;
        // 50.00 price, 5.00 cost, 30% commission = 15.00
        let service = seed_service(&db, 5_000, 500, None).await;
        let engine = BookingEngine::new(db.clone());
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        let done = engine
            .create_appointment(request(
                &barber.id,
                &service.id,
                "Ali Hassan",
                "0551112222",
                date,
            ))
            .await
            .unwrap();
        engine.complete(&done.id).await.unwrap();

        let mut cancelled_req = request(
            &barber.id,
            &service.id,
            "Omar Saleh",
            "0553334444",
            date,
        );
        cancelled_req.price_cents = Some(4_000);
        let cancelled = engine.create_appointment(cancelled_req).await.unwrap();
        engine.cancel(&cancelled.id).await.unwrap();

        let summary = Dashboard::new(db).summary(date).await.unwrap();

        // Revenue and profit come from the completed row only;
        // the cancelled row still counts as an appointment but its
        // customer does not count as served.
        assert_eq!(summary.revenue_cents, 5_000);
        assert_eq!(summary.profit_cents, 5_000 - 500 - 1_500);
        assert_eq!(summary.appointment_count, 2);
        assert_eq!(summary.customer_count, 1);
    }

    #[tokio::test]
    async fn other_days_do_not_bleed_in() {
        let db = test_db().await;
        let barber = seed_barber(&db, 3000).await;
        let service = seed_service(&db, 5_000, 500, None).await;
        let engine = BookingEngine::new(db.clone());

        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let other = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

        let appointment = engine
            .create_appointment(request(
                &barber.id,
                &service.id,
                "Ali Hassan",
                "0551112222",
                date,
            ))
            .await
            .unwrap();
        engine.complete(&appointment.id).await.unwrap();

        let summary = Dashboard::new(db).summary(other).await.unwrap();
        assert_eq!(summary.appointment_count, 0);
        assert_eq!(summary.revenue_cents, 0);
    }
}
