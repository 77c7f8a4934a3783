use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{money, product::Product, user::Profile};
use crate::error::ClientError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(alias = "ID")]
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Profile>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(deserialize_with = "money")]
    pub total: i64,
    #[serde(default)]
    pub address_text: String,
    #[serde(default, alias = "order_items")]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, alias = "ID")]
    pub id: u64,
    pub product_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    /// Per-unit price snapshot taken when the order was placed.
    #[serde(deserialize_with = "money")]
    pub price: i64,
    pub quantity: i64,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity
    }
}

impl Order {
    pub fn items_total(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// The backend only stores the grand total, shipping is what's left over.
    pub fn shipping_cost(&self) -> i64 {
        self.total - self.items_total()
    }

    pub fn timeline(&self) -> Vec<TimelineStep> {
        self.status.timeline()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Menunggu Pembayaran")]
    Pending,
    #[serde(rename = "Diproses")]
    Processed,
    #[serde(rename = "Dikirim")]
    Shipped,
    #[serde(rename = "Selesai")]
    Completed,
    #[serde(rename = "Dibatalkan")]
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processed,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    const PROGRESSION: [(OrderStatus, &'static str); 4] = [
        (OrderStatus::Pending, "Pesanan Dibuat"),
        (OrderStatus::Processed, "Diproses"),
        (OrderStatus::Shipped, "Dikirim"),
        (OrderStatus::Completed, "Selesai"),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Menunggu Pembayaran",
            OrderStatus::Processed => "Diproses",
            OrderStatus::Shipped => "Dikirim",
            OrderStatus::Completed => "Selesai",
            OrderStatus::Canceled => "Dibatalkan",
        }
    }

    /// Customer hint shown next to the order, COD orders only have a few.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            OrderStatus::Pending => {
                Some("Pesanan Anda sedang menunggu pembayaran COD saat pengiriman.")
            }
            OrderStatus::Shipped => {
                Some("Pesanan Anda sedang dalam pengiriman. Siapkan pembayaran COD.")
            }
            OrderStatus::Completed => Some("Terima kasih! Pesanan Anda telah selesai."),
            OrderStatus::Processed | OrderStatus::Canceled => None,
        }
    }

    /// Empty for canceled orders.
    pub fn timeline(&self) -> Vec<TimelineStep> {
        let Some(current) = Self::PROGRESSION
            .iter()
            .position(|(status, _)| status == self)
        else {
            return Vec::new();
        };

        Self::PROGRESSION
            .iter()
            .enumerate()
            .map(|(index, (status, label))| TimelineStep {
                status: *status,
                label: *label,
                completed: index <= current,
                current: index == current,
            })
            .collect()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ClientError::InvalidStatus(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub completed: bool,
    pub current: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Free,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 3] = [
        ShippingMethod::Standard,
        ShippingMethod::Express,
        ShippingMethod::Free,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
            ShippingMethod::Free => "free",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Pengiriman Standard",
            ShippingMethod::Express => "Pengiriman Express",
            ShippingMethod::Free => "Pengiriman Gratis",
        }
    }

    pub fn price(&self) -> i64 {
        match self {
            ShippingMethod::Standard => 10_000,
            ShippingMethod::Express => 25_000,
            ShippingMethod::Free => 0,
        }
    }

    pub fn estimate(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "3-5 hari kerja",
            ShippingMethod::Express => "1-2 hari kerja",
            ShippingMethod::Free => "7-10 hari kerja",
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid shipping method: {}", s))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cod,
}

impl PaymentMethod {
    pub fn name(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery (COD)",
        }
    }
}

/// Body of POST /orders. The server recomputes the item total from the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub address_id: u64,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub shipping_cost: i64,
    pub total: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OrderCreated {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "money")]
    pub total: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}
