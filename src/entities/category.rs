use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_ICON: &str = "🛍️";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, alias = "ID")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default, alias = "productCount", alias = "products_count")]
    pub product_count: u64,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
}
