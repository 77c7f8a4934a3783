use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::product::Product;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default, alias = "ID")]
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(alias = "ID")]
    pub id: u64,
    pub product_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub quantity: i64,
}

impl CartItem {
    pub fn unit_price(&self) -> i64 {
        self.product.as_ref().map(|p| p.price).unwrap_or_default()
    }

    pub fn line_total(&self) -> i64 {
        self.unit_price() * self.quantity
    }

    pub fn name(&self) -> &str {
        self.product.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }
}

impl Cart {
    pub fn subtotal(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities, the number shown on the cart badge.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, item_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: u64) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    pub fn remove(&mut self, item_id: u64) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == item_id)?;
        Some(self.items.remove(index))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddToCart {
    pub product_id: u64,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateCartItem {
    #[validate(range(min = 1))]
    pub quantity: i64,
}
