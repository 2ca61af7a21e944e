//! Post Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod duplicate;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod owned_get;
pub(crate) mod owned_index;
pub(crate) mod update;
