use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{category::Category, default_true, money};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "ID")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "money")]
    pub price: i64,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub category_id: u64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether `quantity` more units fit in the remaining stock.
    pub fn can_add(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.stock_quantity
    }

    /// `category_id` is 0 when the handler only preloaded the relation.
    pub fn effective_category_id(&self) -> Option<u64> {
        match self.category_id {
            0 => self.category.as_ref().map(|c| c.id).filter(|id| *id != 0),
            id => Some(id),
        }
    }
}

/// Body of POST /products and PUT /products/:id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 5, max = 255))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(range(min = 1))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub stock_quantity: i64,
    pub category_id: u64,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductInput {
    /// Form text arrives untrimmed from the admin panel.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        ProductInput {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock_quantity: product.stock_quantity,
            category_id: product.effective_category_id().unwrap_or_default(),
            is_active: product.is_active,
            image_url: product.image_url.clone(),
        }
    }
}
