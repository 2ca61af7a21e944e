//! Businesses

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::BusinessesServiceError;
pub(crate) use repository::PgBusinessesRepository;
pub use service::*;
