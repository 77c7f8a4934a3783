//! Endpoints that work without a token.

pub mod auth;
pub mod category;
pub mod product;
pub mod review;
