//! Posts

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::PostsServiceError;
pub(crate) use repository::PgPostsRepository;
pub use service::*;
