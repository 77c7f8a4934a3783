use tracing::info;

use crate::api::{extract_item, extract_list, ApiClient};
use crate::entities::{Order, OrderStatus, UpdateOrderStatus};
use crate::error::ClientError;

impl ApiClient {
    pub async fn all_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.ensure_admin()?;
        let body = self.get("/admin/orders").await?;
        extract_list(body, &["orders"])
    }

    pub async fn update_order_status(&self, id: u64, status: OrderStatus) -> Result<Order, ClientError> {
        self.ensure_admin()?;
        let body = self
            .put(&format!("/orders/{id}/status"), &UpdateOrderStatus { status })
            .await?;
        info!(id, status = %status, "Order status updated");
        extract_item(body, &["order"])
    }
}
