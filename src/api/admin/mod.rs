//! Admin console endpoints. Each call checks the admin claim before going out.

pub mod category;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
