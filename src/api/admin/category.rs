use tracing::info;
use validator::Validate;

use crate::api::{extract_item, message_of, ApiClient};
use crate::entities::{Category, CategoryInput};
use crate::error::ClientError;

impl ApiClient {
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ClientError> {
        input.validate()?;
        self.ensure_admin()?;
        let body = self.post("/categories", input).await?;
        let category: Category = extract_item(body, &["category"])?;
        info!(id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: u64, input: &CategoryInput) -> Result<Category, ClientError> {
        input.validate()?;
        self.ensure_admin()?;
        let body = self.put(&format!("/categories/{id}"), input).await?;
        extract_item(body, &["category"])
    }

    pub async fn delete_category(&self, id: u64) -> Result<String, ClientError> {
        self.ensure_admin()?;
        let body = self.delete(&format!("/categories/{id}")).await?;
        Ok(message_of(&body))
    }

    /// Asks the server to recompute every category's product count.
    pub async fn recount_categories(&self) -> Result<String, ClientError> {
        self.ensure_admin()?;
        let body = self.post_empty("/categories/recount").await?;
        Ok(message_of(&body))
    }
}
