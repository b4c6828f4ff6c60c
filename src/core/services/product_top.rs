use crate::core::client::ApiClient;
use crate::domain::model::TopProduct;
use crate::utils::error::Result;

pub const ENDPOINT: &str = "/mahsulot/top10/";
pub const TOP_PRODUCTS_ERROR: &str = "Failed to load top products";

impl ApiClient {
    /// Ten best-selling products. Needs a bearer token; like every other
    /// endpoint it gets one from the client's token store.
    pub async fn top_products(&self) -> Result<Vec<TopProduct>> {
        self.fetch_json(ENDPOINT, TOP_PRODUCTS_ERROR).await
    }
}
