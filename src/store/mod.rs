//! Client-side state built on top of [`ApiClient`](crate::api::ApiClient).

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod moderation;

pub use cart::{CartStore, CartSummary};
pub use catalog::{page, page_count, Catalog, ProductFilter, SortBy, PAGE_SIZE, SIMILAR_LIMIT};
pub use checkout::{Checkout, CheckoutStep, OrderSummary};
pub use dashboard::DashboardStats;
pub use moderation::{ReviewBoard, ReviewFilter, StatusCounts};
