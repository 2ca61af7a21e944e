//! Shopping Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod make_order;
pub(crate) mod remove;
