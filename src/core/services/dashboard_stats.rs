use crate::core::client::ApiClient;
use crate::domain::model::DashboardStats;
use crate::utils::error::Result;

pub const ENDPOINT: &str = "/dashboard/stats/";
pub const DASHBOARD_STATS_ERROR: &str = "Failed to load dashboard statistics";

impl ApiClient {
    /// Headline sales, order and customer totals.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.fetch_json(ENDPOINT, DASHBOARD_STATS_ERROR).await
    }
}
