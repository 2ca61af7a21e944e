//! Image references

use serde::{Deserialize, Serialize};

/// An image hosted elsewhere and referenced by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}
