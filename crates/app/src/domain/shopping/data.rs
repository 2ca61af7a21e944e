//! Shopping Data

use crate::domain::{posts::models::PostUuid, shopping::models::Shopping};

/// Request to put units of a post in the purchaser's cart for its business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToShopping {
    pub route_name: String,
    pub post: PostUuid,
    pub amount_to_add: u64,
}

/// Outcome of [`AddToShopping`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingAdded {
    pub shopping: Shopping,
    pub requested: u64,

    /// Units actually added; lower than `requested` when stock ran short.
    pub added: u64,
}

impl ShoppingAdded {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.added < self.requested
    }
}
