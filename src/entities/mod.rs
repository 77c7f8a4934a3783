pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use cart::{AddToCart, Cart, CartItem, UpdateCartItem};
pub use category::{Category, CategoryInput};
pub use order::{
    Order, OrderCreated, OrderItem, OrderRequest, OrderStatus, PaymentMethod, ShippingMethod,
    TimelineStep, UpdateOrderStatus,
};
pub use product::{Product, ProductInput};
pub use review::{Review, ReviewInput, ReviewStatus};
pub use user::{Address, ChangePassword, LoginInput, Profile, RegisterInput, UpdateProfile, UserUpdate};

use serde::{Deserialize, Deserializer};

/// Rupiah amounts arrive as integers from newer handlers and as decimals from older ones.
pub(crate) fn money<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Int(value) => Ok(value),
        Amount::Float(value) => Ok(value.round() as i64),
        Amount::Text(value) => value
            .trim()
            .parse::<f64>()
            .map(|value| value.round() as i64)
            .map_err(serde::de::Error::custom),
    }
}

pub(crate) fn default_true() -> bool {
    true
}
