//! # Walk-In Session Engine
//!
//! Records a walk-in customer's visit as an already-completed session in one
//! atomic step. There is no pending state: the customer is in the chair, the
//! cut happens, money changes hands, and the books update together.
//!
//! ## Atomic Unit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_walk_in(request)          ONE TRANSACTION                       │
//! │                                                                         │
//! │  1. Resolve-or-create Customer by phone (points-before read here)       │
//! │  2. Load Barber + Service, resolve pricing                              │
//! │  3. Allocate SES-YYYYMMDD-NNN                                           │
//! │  4. INSERT session (status completed, check-in = check-out = now)       │
//! │  5. Credit Customer: +1 visit, +price spend, +points, last_visit        │
//! │  6. Credit Barber: +1 service, +price revenue                           │
//! │                                                                         │
//! │  Any failure rolls back the lot, including a customer created in        │
//! │  step 1. No orphan identities, no half-applied ledgers.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::booking::{load_barber_and_service, resolve_or_create_customer};
use crate::engine::sequence::{next_reference, ReferenceKind};
use crate::engine::{EngineResult, REFERENCE_RETRY_ATTEMPTS};
use crate::error::DbError;
use crate::pool::Database;
use crate::repository::{barber, customer, session};
use clipper_core::{
    validation, Money, PaymentMethod, Session, SessionLineItem, SessionStatus,
};

/// Input for recording a walk-in visit.
#[derive(Debug, Clone)]
pub struct RecordWalkIn {
    pub customer_name: String,
    pub phone: String,
    pub barber_id: String,
    pub service_id: String,
    /// Price of record in cents. `None` takes the catalogue list price.
    pub price_cents: Option<i64>,
    pub payment_method: PaymentMethod,
}

/// Receipt handed back after a walk-in is recorded.
#[derive(Debug, Clone)]
pub struct WalkInReceipt {
    pub session_number: String,
    pub final_price_cents: i64,
    pub points_earned: i64,
    /// Customer's loyalty balance before this visit.
    pub points_before: i64,
    /// Customer's loyalty balance after this visit.
    pub points_after: i64,
}

/// Records walk-in sessions atomically over one database handle.
#[derive(Debug, Clone)]
pub struct WalkInEngine {
    db: Database,
}

impl WalkInEngine {
    /// Creates a walk-in engine over the given database.
    pub fn new(db: Database) -> Self {
        WalkInEngine { db }
    }

    /// Records a walk-in visit as a completed session.
    ///
    /// Returns the session number and the customer's loyalty balance before
    /// and after the visit.
    pub async fn record_walk_in(&self, request: RecordWalkIn) -> EngineResult<WalkInReceipt> {
        validation::validate_customer_name(&request.customer_name)?;
        validation::validate_phone(&request.phone)?;
        if let Some(cents) = request.price_cents {
            validation::validate_price_cents(cents)?;
        }

        let mut attempt = 1;
        loop {
            match self.try_record(&request).await {
                Err(err) if err.is_reference_conflict() && attempt < REFERENCE_RETRY_ATTEMPTS => {
                    warn!(attempt, "Session number collision, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn try_record(&self, request: &RecordWalkIn) -> EngineResult<WalkInReceipt> {
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let cust =
            resolve_or_create_customer(&mut tx, &request.customer_name, &request.phone).await?;
        let points_before = cust.loyalty_points;

        let (barber_row, service) =
            load_barber_and_service(&mut tx, &request.barber_id, &request.service_id).await?;

        let price = Money::from_cents(request.price_cents.unwrap_or(service.price_cents));
        let breakdown = clipper_core::resolve_pricing(&service, &barber_row, price);
        let points_earned = price.loyalty_points();

        let now = Utc::now();
        let number = next_reference(&mut tx, ReferenceKind::Session, now.date_naive()).await?;

        let line_items = vec![SessionLineItem {
            service_id: service.id.clone(),
            name: service.name.clone(),
            price_cents: price.cents(),
        }];
        let services_json = serde_json::to_string(&line_items)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let record = Session {
            id: Uuid::new_v4().to_string(),
            session_number: number.clone(),
            customer_id: Some(cust.id.clone()),
            customer_name: request.customer_name.clone(),
            barber_id: barber_row.id.clone(),
            barber_name: barber_row.name.clone(),
            services: services_json,
            total_price_cents: price.cents(),
            total_cost_cents: breakdown.cost_cents,
            total_commission_cents: breakdown.commission_cents,
            discount_cents: 0,
            final_price_cents: price.cents(),
            payment_method: request.payment_method,
            loyalty_points_earned: points_earned,
            loyalty_points_used: 0,
            status: SessionStatus::Completed,
            check_in_time: now,
            check_out_time: now,
            created_at: now,
        };

        session::insert(&mut tx, &record).await?;
        customer::credit_visit(&mut tx, &cust.id, price.cents(), points_earned, now).await?;
        barber::credit_service(&mut tx, &barber_row.id, price.cents()).await?;

        tx.commit().await.map_err(DbError::from)?;

        info!(
            number = %number,
            price = %price,
            points_earned,
            "Walk-in session recorded"
        );

        Ok(WalkInReceipt {
            session_number: number,
            final_price_cents: price.cents(),
            points_earned,
            points_before,
            points_after: points_before + points_earned,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::test_support::{seed_barber, seed_service, test_db};

    fn request(barber_id: &str, service_id: &str) -> RecordWalkIn {
        RecordWalkIn {
            customer_name: "Ali Hassan".to_string(),
            phone: "0551112222".to_string(),
            barber_id: barber_id.to_string(),
            service_id: service_id.to_string(),
            price_cents: None,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn walk_in_credits_everyone_at_once() {
        let db = test_db().await;
        let barber_row = seed_barber(&db, 3000).await;
        let service = seed_service(&db, 15_500, 300, None).await;
        let engine = WalkInEngine::new(db.clone());

        let receipt = engine
            .record_walk_in(request(&barber_row.id, &service.id))
            .await
            .unwrap();

        // floor(155.00 * 0.1) = 15 points
        assert_eq!(receipt.points_earned, 15);
        assert_eq!(receipt.points_before, 0);
        assert_eq!(receipt.points_after, 15);
        assert_eq!(receipt.final_price_cents, 15_500);

        let today = Utc::now().date_naive().format("%Y%m%d").to_string();
        assert_eq!(receipt.session_number, format!("SES-{today}-001"));

        let cust = db
            .customers()
            .find_by_phone("0551112222")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cust.loyalty_points, 15);
        assert_eq!(cust.total_visits, 1);
        assert_eq!(cust.total_spent_cents, 15_500);

        let barber_after = db.barbers().get_by_id(&barber_row.id).await.unwrap().unwrap();
        assert_eq!(barber_after.total_services, 1);
        assert_eq!(barber_after.total_revenue_cents, 15_500);
    }

    #[tokio::test]
    async fn session_row_carries_the_snapshot() {
        let db = test_db().await;
        let barber_row = seed_barber(&db, 3000).await;
        let service = seed_service(&db, 10_000, 500, None).await;
        let engine = WalkInEngine::new(db.clone());

        let receipt = engine
            .record_walk_in(request(&barber_row.id, &service.id))
            .await
            .unwrap();

        let stored = db
            .sessions()
            .get_by_number(&receipt.session_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, SessionStatus::Completed);
        assert_eq!(stored.total_price_cents, 10_000);
        assert_eq!(stored.total_cost_cents, 500);
        assert_eq!(stored.total_commission_cents, 3_000);
        assert_eq!(stored.discount_cents, 0);
        assert_eq!(stored.final_price_cents, 10_000);
        assert_eq!(stored.check_in_time, stored.check_out_time);

        let items = stored.line_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Classic Haircut");
        assert_eq!(items[0].price_cents, 10_000);
    }

    #[tokio::test]
    async fn repeat_visits_accumulate_points() {
        let db = test_db().await;
        let barber_row = seed_barber(&db, 3000).await;
        let service = seed_service(&db, 15_500, 300, None).await;
        let engine = WalkInEngine::new(db.clone());

        engine
            .record_walk_in(request(&barber_row.id, &service.id))
            .await
            .unwrap();
        let second = engine
            .record_walk_in(request(&barber_row.id, &service.id))
            .await
            .unwrap();

        assert_eq!(second.points_before, 15);
        assert_eq!(second.points_after, 30);
        assert_eq!(db.customers().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failure_rolls_back_the_new_customer() {
        let db = test_db().await;
        let service = seed_service(&db, 10_000, 500, None).await;
        let engine = WalkInEngine::new(db.clone());

        let err = engine
            .record_walk_in(request("no-such-barber", &service.id))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Db(DbError::NotFound { entity: "Barber", .. })
        ));

        // Step 1 created a customer inside the transaction; the rollback
        // must take it with it - no orphan identities, no session row.
        assert!(db.customers().list_all().await.unwrap().is_empty());
        assert!(db.sessions().list_recent(10).await.unwrap().is_empty());
    }
}
