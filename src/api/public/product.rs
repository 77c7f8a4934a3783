use tracing::warn;

use crate::api::{count_of, extract_item, extract_list, ApiClient};
use crate::entities::Product;
use crate::error::ClientError;

impl ApiClient {
    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        let body = self.get("/products").await?;
        extract_list(body, &["products"])
    }

    pub async fn product(&self, id: u64) -> Result<Product, ClientError> {
        let body = self.get(&format!("/products/{id}")).await?;
        extract_item(body, &["product"])
    }

    /// Falls back to counting the list when the counter endpoint fails or
    /// answers with something that is not a number.
    pub async fn product_count(&self) -> Result<u64, ClientError> {
        match self.get("/products/count").await {
            Ok(body) => {
                if let Some(total) = count_of(&body, "total_products") {
                    return Ok(total);
                }
                warn!("total_products missing from count response, counting the list");
            }
            Err(err) => {
                warn!(value = %err, "Product count failed, counting the list");
            }
        }
        Ok(self.products().await?.len() as u64)
    }
}
