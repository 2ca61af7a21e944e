//! Shopping Repositories

mod lines;
mod shopping;

pub(crate) use lines::{PgShoppingLinesRepository, ShoppingLine};
pub(crate) use shopping::PgShoppingRepository;
