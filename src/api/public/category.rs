use tracing::warn;

use crate::api::{count_of, extract_item, extract_list, ApiClient};
use crate::entities::Category;
use crate::error::ClientError;

impl ApiClient {
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let body = self.get("/categories").await?;
        extract_list(body, &["categories"])
    }

    pub async fn category(&self, id: u64) -> Result<Category, ClientError> {
        let body = self.get(&format!("/categories/{id}")).await?;
        extract_item(body, &["category"])
    }

    pub async fn category_count(&self) -> Result<u64, ClientError> {
        match self.get("/categories/count").await {
            Ok(body) => {
                if let Some(total) = count_of(&body, "total_categories") {
                    return Ok(total);
                }
                warn!("total_categories missing from count response, counting the list");
            }
            Err(err) => {
                warn!(value = %err, "Category count failed, counting the list");
            }
        }
        Ok(self.categories().await?.len() as u64)
    }
}
