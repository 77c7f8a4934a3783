//! Endpoints scoped to the logged-in customer.

pub mod cart;
pub mod order;
pub mod profile;
pub mod review;
