use validator::Validate;

use crate::api::{extract_item, message_of, ApiClient};
use crate::entities::{Review, ReviewInput};
use crate::error::ClientError;

impl ApiClient {
    /// The server answers with the stored review, status `pending` until moderated.
    pub async fn create_review(&self, product_id: u64, input: &ReviewInput) -> Result<Review, ClientError> {
        input.validate()?;
        self.ensure_user()?;
        let body = self
            .post(&format!("/products/{product_id}/reviews"), input)
            .await?;
        extract_item(body, &["review"])
    }

    pub async fn update_review(&self, id: u64, input: &ReviewInput) -> Result<Review, ClientError> {
        input.validate()?;
        self.ensure_user()?;
        let body = self.put(&format!("/reviews/{id}"), input).await?;
        extract_item(body, &["review"])
    }

    pub async fn delete_review(&self, id: u64) -> Result<String, ClientError> {
        self.ensure_user()?;
        let body = self.delete(&format!("/reviews/{id}")).await?;
        Ok(message_of(&body))
    }
}
