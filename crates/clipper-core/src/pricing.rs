//! # Pricing & Commission Resolver
//!
//! Derives the cost and commission for a priced transaction.
//!
//! ## The Override-Else-Fallback Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  effectiveRate = Service.commission_override   (if set and non-zero)    │
//! │                  else Barber.commission_rate                            │
//! │                                                                         │
//! │  commission    = quotedPrice × effectiveRate                            │
//! │  cost          = Service.cost (snapshot)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The quoted price is caller-supplied: the booking form defaults it to the
//! service list price but the operator may override it. The resolver trusts
//! it as the transaction's price of record and never re-derives it from the
//! service.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Barber, CommissionRate, Service};

// =============================================================================
// Price Breakdown
// =============================================================================

/// The derived financials for one priced transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Material/operating cost snapshot in cents.
    pub cost_cents: i64,
    /// Commission owed to the barber in cents.
    pub commission_cents: i64,
    /// The rate that produced the commission, in basis points.
    pub effective_rate_bps: u32,
}

impl PriceBreakdown {
    /// Returns the cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Returns the commission as Money.
    #[inline]
    pub fn commission(&self) -> Money {
        Money::from_cents(self.commission_cents)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the commission rate for a service performed by a barber.
///
/// A service override of zero counts as "no override" - the barber's own
/// rate applies.
pub fn effective_commission_rate(service: &Service, barber: &Barber) -> CommissionRate {
    service
        .commission_override()
        .unwrap_or_else(|| barber.commission_rate())
}

/// Resolves cost and commission for a quoted price.
///
/// ## Example
/// ```rust
/// use clipper_core::money::Money;
/// use clipper_core::pricing::resolve_pricing;
/// # use chrono::Utc;
/// # use clipper_core::types::{ActiveStatus, Barber, Service};
/// # let service = Service {
/// #     id: "svc".into(), name: "Cut".into(), category: "Haircut".into(),
/// #     duration_minutes: 30, price_cents: 10_000, cost_cents: 500,
/// #     commission_rate_bps: Some(800), status: ActiveStatus::Active,
/// #     created_at: Utc::now(),
/// # };
/// # let barber = Barber {
/// #     id: "bar".into(), name: "Khalid".into(), phone: "05".into(),
/// #     commission_rate_bps: 3000, status: ActiveStatus::Active,
/// #     total_services: 0, total_revenue_cents: 0, created_at: Utc::now(),
/// # };
///
/// // Service override of 8% wins over the barber's 30%
/// let breakdown = resolve_pricing(&service, &barber, Money::from_cents(10_000));
/// assert_eq!(breakdown.commission_cents, 800);
/// assert_eq!(breakdown.effective_rate_bps, 800);
/// ```
pub fn resolve_pricing(service: &Service, barber: &Barber, quoted_price: Money) -> PriceBreakdown {
    let rate = effective_commission_rate(service, barber);

    PriceBreakdown {
        cost_cents: service.cost_cents,
        commission_cents: quoted_price.commission(rate).cents(),
        effective_rate_bps: rate.bps(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActiveStatus;
    use chrono::Utc;

    fn service(override_bps: Option<u32>) -> Service {
        Service {
            id: "svc-1".to_string(),
            name: "Modern fade".to_string(),
            category: "Haircut".to_string(),
            duration_minutes: 45,
            price_cents: 6_000,
            cost_cents: 800,
            commission_rate_bps: override_bps,
            status: ActiveStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn barber(rate_bps: u32) -> Barber {
        Barber {
            id: "bar-1".to_string(),
            name: "Khalid".to_string(),
            phone: "0501234567".to_string(),
            commission_rate_bps: rate_bps,
            status: ActiveStatus::Active,
            total_services: 0,
            total_revenue_cents: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_override_wins_over_barber_rate() {
        // Service says 8%, barber says 30%: commission is 8.00 on 100.00
        let breakdown = resolve_pricing(&service(Some(800)), &barber(3000), Money::from_cents(10_000));
        assert_eq!(breakdown.commission_cents, 800);
        assert_eq!(breakdown.effective_rate_bps, 800);
    }

    #[test]
    fn test_fallback_to_barber_rate() {
        // No override: barber's 30% applies
        let breakdown = resolve_pricing(&service(None), &barber(3000), Money::from_cents(10_000));
        assert_eq!(breakdown.commission_cents, 3_000);
        assert_eq!(breakdown.effective_rate_bps, 3000);
    }

    #[test]
    fn test_zero_override_is_no_override() {
        let breakdown = resolve_pricing(&service(Some(0)), &barber(3000), Money::from_cents(10_000));
        assert_eq!(breakdown.commission_cents, 3_000);
        assert_eq!(breakdown.effective_rate_bps, 3000);
    }

    #[test]
    fn test_cost_is_snapshotted_from_service() {
        let breakdown = resolve_pricing(&service(None), &barber(3000), Money::from_cents(10_000));
        assert_eq!(breakdown.cost_cents, 800);
    }

    #[test]
    fn test_quoted_price_drives_commission_not_list_price() {
        // List price is 60.00 but the operator quoted 100.00
        let breakdown = resolve_pricing(&service(None), &barber(3000), Money::from_cents(10_000));
        assert_eq!(breakdown.commission_cents, 3_000); // 30% of the quote
    }
}
