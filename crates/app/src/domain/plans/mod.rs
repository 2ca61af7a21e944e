//! Payment Plans

pub mod models;
mod repository;

pub(crate) use repository::PgPlansRepository;
