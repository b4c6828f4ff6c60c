//! One module per dashboard endpoint. Each adds a single method to
//! [`ApiClient`](crate::core::client::ApiClient) and owns the message shown
//! when that endpoint fails for any reason other than authentication.

pub mod customer;
pub mod dashboard_stats;
pub mod order_stats;
pub mod product_top;
pub mod revenue;

pub use customer::CUSTOMER_SOURCES_ERROR;
pub use dashboard_stats::DASHBOARD_STATS_ERROR;
pub use order_stats::{EMPTY_ORDER_STATS_WARNING, ORDER_STATS_ERROR};
pub use product_top::TOP_PRODUCTS_ERROR;
pub use revenue::MONTHLY_REVENUE_ERROR;
