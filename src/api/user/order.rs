use tracing::info;

use crate::api::{extract_item, extract_list, ApiClient};
use crate::entities::{Order, OrderCreated, OrderRequest};
use crate::error::ClientError;

impl ApiClient {
    pub async fn create_order(&self, request: &OrderRequest) -> Result<OrderCreated, ClientError> {
        self.ensure_user()?;
        let body = self.post("/orders", request).await?;
        let created: OrderCreated = serde_json::from_value(body)?;

        info!(
            shipping = request.shipping_method.id(),
            total = created.total,
            "Order placed"
        );
        Ok(created)
    }

    /// Orders of the logged-in user.
    pub async fn orders(&self) -> Result<Vec<Order>, ClientError> {
        self.ensure_user()?;
        let body = self.get("/orders").await?;
        extract_list(body, &["orders"])
    }

    pub async fn order(&self, id: u64) -> Result<Order, ClientError> {
        self.ensure_user()?;
        let body = self.get(&format!("/orders/{id}")).await?;
        extract_item(body, &["order"])
    }
}
