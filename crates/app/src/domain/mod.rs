//! Marketplace Domain Concerns

use thiserror::Error;

pub mod businesses;
pub mod images;
pub mod plans;
pub mod posts;
pub mod shopping;
pub mod users;

/// A stored or submitted value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
