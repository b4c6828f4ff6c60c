use crate::core::client::ApiClient;
use crate::domain::model::CustomerSources;
use crate::utils::error::Result;

pub const ENDPOINT: &str = "/customers/source/";
pub const CUSTOMER_SOURCES_ERROR: &str = "Failed to load customer sources";

impl ApiClient {
    /// Where customers came from, per time bucket.
    pub async fn customer_sources(&self) -> Result<CustomerSources> {
        self.fetch_json(ENDPOINT, CUSTOMER_SOURCES_ERROR).await
    }
}
