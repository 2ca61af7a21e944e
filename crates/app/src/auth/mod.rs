//! Authentication

mod codes;
mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use codes::*;
pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
