use tracing::info;
use validator::Validate;

use crate::api::{extract_item, message_of, ApiClient};
use crate::entities::{Product, ProductInput};
use crate::error::ClientError;

impl ApiClient {
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ClientError> {
        let input = input.clone().trimmed();
        input.validate()?;
        self.ensure_admin()?;

        let body = self.post("/products", &input).await?;
        let product: Product = extract_item(body, &["product"])?;
        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: u64, input: &ProductInput) -> Result<Product, ClientError> {
        let input = input.clone().trimmed();
        input.validate()?;
        self.ensure_admin()?;

        let body = self.put(&format!("/products/{id}"), &input).await?;
        extract_item(body, &["product"])
    }

    pub async fn delete_product(&self, id: u64) -> Result<String, ClientError> {
        self.ensure_admin()?;
        let body = self.delete(&format!("/products/{id}")).await?;
        info!(id, "Product deleted");
        Ok(message_of(&body))
    }
}
