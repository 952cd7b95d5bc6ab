//! Shared fixtures for engine and repository tests.

use crate::pool::{Database, DbConfig};
use crate::repository::service::NewService;
use clipper_core::{Barber, Service};

/// Fresh in-memory database with migrations applied.
pub(crate) async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Seeds a barber with the given commission rate.
pub(crate) async fn seed_barber(db: &Database, rate_bps: u32) -> Barber {
    db.barbers()
        .create("Khalid Mohammed", "0500000001", Some(rate_bps))
        .await
        .unwrap()
}

/// Seeds a catalogue service.
pub(crate) async fn seed_service(
    db: &Database,
    price_cents: i64,
    cost_cents: i64,
    commission_override_bps: Option<u32>,
) -> Service {
    db.services()
        .create(NewService {
            name: "Classic Haircut".to_string(),
            category: "Haircut".to_string(),
            duration_minutes: 30,
            price_cents,
            cost_cents,
            commission_rate_bps: commission_override_bps,
        })
        .await
        .unwrap()
}
