//! Business Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{UnknownVariant, images::Image, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Business UUID
pub type BusinessUuid = TypedUuid<Business>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessCategory {
    Food,
    Tool,
    Clothing,
    Service,
}

impl BusinessCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Tool => "tool",
            Self::Clothing => "clothing",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "food" => Ok(Self::Food),
            "tool" => Ok(Self::Tool),
            "clothing" => Ok(Self::Clothing),
            "service" => Ok(Self::Service),
            _ => Err(UnknownVariant::new("business category", value)),
        }
    }
}

/// A category posts of a business can be tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCategory {
    pub label: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutUsPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Business Model
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    pub uuid: BusinessUuid,
    pub name: String,
    pub route_name: String,
    pub category: BusinessCategory,
    pub created_by: UserUuid,
    pub hidden: bool,
    pub banner_images: Vec<Image>,
    pub logo: Option<Image>,
    pub post_categories: Vec<PostCategory>,
    pub social_links: SocialLinks,

    /// Free-form presentation settings owned by the storefront client.
    pub layouts: Value,

    pub about_us_page: Option<AboutUsPage>,
    pub whatsapp_phone_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Whether a route name is a lower-case slug such as `my-shop-2`.
#[must_use]
pub fn is_valid_route_name(route_name: &str) -> bool {
    !route_name.is_empty()
        && route_name
            .split('-')
            .all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_valid_route_names() {
        for route_name in ["shop", "my-shop", "tienda-2", "a1-b2-c3"] {
            assert!(is_valid_route_name(route_name), "{route_name}");
        }
    }

    #[test]
    fn non_slugs_are_rejected() {
        for route_name in ["", "Shop", "my shop", "-shop", "shop-", "my--shop", "tienda_2", "ñu"] {
            assert!(!is_valid_route_name(route_name), "{route_name}");
        }
    }

    #[test]
    fn category_parses_storage_names() {
        assert_eq!("clothing".parse(), Ok(BusinessCategory::Clothing));
        assert!("toys".parse::<BusinessCategory>().is_err());
    }
}
