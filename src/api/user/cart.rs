use validator::Validate;

use crate::api::{extract_item, message_of, ApiClient};
use crate::entities::{AddToCart, Cart, UpdateCartItem};
use crate::error::ClientError;

impl ApiClient {
    pub async fn cart(&self) -> Result<Cart, ClientError> {
        self.ensure_user()?;
        let body = self.get("/cart").await?;
        if body.is_null() {
            return Ok(Cart::default());
        }
        extract_item(body, &["cart"])
    }

    pub async fn add_to_cart(&self, input: &AddToCart) -> Result<String, ClientError> {
        input.validate()?;
        self.ensure_user()?;
        let body = self.post("/cart", input).await?;
        Ok(message_of(&body))
    }

    pub async fn update_cart_item(&self, item_id: u64, quantity: i64) -> Result<String, ClientError> {
        let input = UpdateCartItem { quantity };
        input.validate()?;
        self.ensure_user()?;
        let body = self.put(&format!("/cart/{item_id}"), &input).await?;
        Ok(message_of(&body))
    }

    pub async fn remove_cart_item(&self, item_id: u64) -> Result<String, ClientError> {
        self.ensure_user()?;
        let body = self.delete(&format!("/cart/{item_id}")).await?;
        Ok(message_of(&body))
    }

    pub async fn clear_cart(&self) -> Result<String, ClientError> {
        self.ensure_user()?;
        let body = self.delete("/cart/clear").await?;
        Ok(message_of(&body))
    }
}
