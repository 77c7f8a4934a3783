use crate::api::{count_of, extract_item, ApiClient};
use crate::entities::Review;
use crate::error::ClientError;

impl ApiClient {
    pub async fn review(&self, id: u64) -> Result<Review, ClientError> {
        let body = self.get(&format!("/reviews/{id}")).await?;
        extract_item(body, &["review"])
    }

    /// Only a bare array counts as a list here; any other shape is no reviews.
    pub async fn product_reviews(&self, product_id: u64) -> Result<Vec<Review>, ClientError> {
        let body = self.get(&format!("/products/{product_id}/reviews")).await?;
        if !body.is_array() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(body)?)
    }

    pub async fn review_count(&self) -> Result<u64, ClientError> {
        let body = self.get("/reviews/count").await?;
        Ok(count_of(&body, "total_reviews").unwrap_or(0))
    }
}
