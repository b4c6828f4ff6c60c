use crate::core::client::ApiClient;
use crate::domain::model::OrderStats;
use crate::utils::error::Result;

pub const ENDPOINT: &str = "/dashboard/order-stats/";
pub const ORDER_STATS_ERROR: &str = "Failed to load order statistics";
pub const EMPTY_ORDER_STATS_WARNING: &str = "Order statistics are empty in every bucket";

impl ApiClient {
    /// Order totals and category breakdown per bucket.
    ///
    /// An all-empty response is passed through as-is; it only produces a
    /// warning on the diagnostics channel.
    pub async fn order_stats(&self) -> Result<OrderStats> {
        let stats: OrderStats = self.fetch_json(ENDPOINT, ORDER_STATS_ERROR).await?;

        if stats.is_empty() {
            self.diagnostics().warn(ENDPOINT, EMPTY_ORDER_STATS_WARNING);
        } else {
            tracing::debug!("Order stats: {} records across buckets", stats.len());
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::CollectingDiagnostics;
    use crate::config::ApiSettings;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn empty_buckets_warn_once_and_pass_through() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ENDPOINT);
            then.status(200).json_body(serde_json::json!({
                "daily": [], "weekly": [], "monthly": [], "all": []
            }));
        });

        let diagnostics = CollectingDiagnostics::default();
        let client = ApiClient::new(&ApiSettings::new(server.base_url()))
            .unwrap()
            .with_diagnostics(diagnostics.clone());

        let stats = client.order_stats().await.unwrap();

        assert!(stats.is_empty());
        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(diagnostics.warnings()[0].contains(EMPTY_ORDER_STATS_WARNING));
        assert!(diagnostics.failures().is_empty());
    }

    #[tokio::test]
    async fn one_filled_bucket_does_not_warn() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ENDPOINT);
            then.status(200).json_body(serde_json::json!({
                "daily": [],
                "weekly": [],
                "monthly": [],
                "all": [{
                    "date": "2024-05-01",
                    "total_sales": 1200.0,
                    "order_count": 4,
                    "category_breakdown": [{"name": "Ichimliklar", "value": 60.0, "color": "#00f"}]
                }]
            }));
        });

        let diagnostics = CollectingDiagnostics::default();
        let client = ApiClient::new(&ApiSettings::new(server.base_url()))
            .unwrap()
            .with_diagnostics(diagnostics.clone());

        let stats = client.order_stats().await.unwrap();

        assert_eq!(stats.all.len(), 1);
        assert_eq!(stats.all[0].category_breakdown[0].name, "Ichimliklar");
        assert!(diagnostics.warnings().is_empty());
    }
}
