//! Stats Module
//!
//! Dashboard aggregates for the admin back office, computed in a single
//! multi-statement query so the numbers come from one consistent read.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::utils::AppResult;

/// Shape returned by `GET /api/admin/stats`; field names are part of the
/// admin front-end contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub new_users_last_30_days: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub average_order_value: f64,
}

#[derive(Clone)]
pub struct AdminStatsAggregator {
    db: Surreal<Db>,
}

impl AdminStatsAggregator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub async fn collect(&self) -> AppResult<AdminStats> {
        let cutoff = Utc::now() - Duration::days(30);

        let mut result = self
            .db
            .query(
                r#"
                LET $total_users = (SELECT count() AS count FROM user GROUP ALL)[0].count OR 0;
                LET $new_users = (SELECT count() AS count FROM user WHERE createdAt >= $cutoff GROUP ALL)[0].count OR 0;
                LET $total_products = (SELECT count() AS count FROM product GROUP ALL)[0].count OR 0;

                LET $all_orders = SELECT total FROM orders;
                LET $total_orders = count($all_orders);
                LET $total_revenue = math::sum($all_orders.total) OR 0;
                LET $avg_order = IF $total_orders > 0 THEN $total_revenue / $total_orders ELSE 0 END;

                RETURN {
                    totalUsers: $total_users,
                    newUsersLast30Days: $new_users,
                    totalProducts: $total_products,
                    totalOrders: $total_orders,
                    totalRevenue: $total_revenue,
                    averageOrderValue: $avg_order
                }
                "#,
            )
            .bind(("cutoff", cutoff))
            .await?;

        let stats = result.take::<Option<AdminStats>>(7)?.unwrap_or(AdminStats {
            total_users: 0,
            new_users_last_30_days: 0,
            total_products: 0,
            total_orders: 0,
            total_revenue: 0.0,
            average_order_value: 0.0,
        });

        Ok(stats)
    }
}
