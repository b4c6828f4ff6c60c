use crate::core::client::ApiClient;
use crate::domain::model::MonthlyRevenue;
use crate::utils::error::Result;

pub const ENDPOINT: &str = "/revenue/monthly/";
pub const MONTHLY_REVENUE_ERROR: &str = "Failed to load monthly revenue";

impl ApiClient {
    pub async fn monthly_revenue(&self) -> Result<MonthlyRevenue> {
        self.fetch_json(ENDPOINT, MONTHLY_REVENUE_ERROR).await
    }
}
