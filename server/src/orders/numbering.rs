//! Order numbering
//!
//! Human-readable daily-sequential identifiers: `FP` + `YYMMDD` + a
//! 3-digit sequence starting at 001 each calendar day (UTC). The
//! sequence comes from counting the day's existing orders, so two
//! concurrent checkouts can draw the same number; the unique index on
//! `orderNumber` catches that and the caller retries once.

use chrono::{DateTime, Utc};

use crate::db::repository::{OrderRepository, RepoResult};
use crate::utils::time::day_bounds;

/// Sequence `prior_count + 1` zero-padded to three digits. Past 999
/// orders in one day the sequence simply grows to four digits; numbers
/// stay unique, just longer.
pub fn format_order_number(now: DateTime<Utc>, prior_count: i64) -> String {
    format!("FP{}{:03}", now.format("%y%m%d"), prior_count + 1)
}

/// Count today's orders and derive the next number.
pub async fn next_order_number(
    orders: &OrderRepository,
    now: DateTime<Utc>,
) -> RepoResult<String> {
    let (start, end) = day_bounds(now);
    let count = orders.count_created_between(start, end).await?;
    Ok(format_order_number(now, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn first_order_of_the_day() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 10, 30, 0).unwrap();
        assert_eq!(format_order_number(now, 0), "FP260829001");
    }

    #[test]
    fn sequence_follows_prior_count() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 23, 59, 59).unwrap();
        assert_eq!(format_order_number(now, 41), "FP260105042");
    }

    #[test]
    fn thousandth_order_widens_the_sequence() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        assert_eq!(format_order_number(now, 999), "FP2608291000");
    }

    #[tokio::test]
    async fn counts_only_same_day_orders() {
        use crate::db;
        use crate::db::models::{
            BillingAddress, NotificationFlags, OrderCreate, OrderStatus, ShippingAddress,
        };

        let database = db::connect_memory().await.unwrap();
        let orders = OrderRepository::new(database);

        let now = Utc::now();
        let yesterday = now - chrono::Duration::days(1);

        for (created_at, number) in [(yesterday, "FP000"), (now, "FP001")] {
            orders
                .create(OrderCreate {
                    user: None,
                    items: Vec::new(),
                    total: 10.0,
                    status: OrderStatus::Pending,
                    order_number: number.to_string(),
                    shipping_address: ShippingAddress::default(),
                    billing_address: BillingAddress::default(),
                    notifications: NotificationFlags::default(),
                    created_at,
                })
                .await
                .unwrap();
        }

        let next = next_order_number(&orders, now).await.unwrap();
        assert_eq!(next, format_order_number(now, 1));
    }
}
