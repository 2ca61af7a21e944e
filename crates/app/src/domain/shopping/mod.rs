//! Shopping Carts

pub mod data;
pub mod errors;
pub mod models;
mod repositories;
pub mod service;
mod stock;

pub use errors::ShoppingServiceError;
pub use service::*;
pub(crate) use stock::release_purchaser_carts;
