//! Shopping Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        UnknownVariant,
        images::Image,
        posts::models::{Post, PostCurrency, PostUuid},
        users::models::UserUuid,
    },
    uuids::TypedUuid,
};

/// Shopping UUID
pub type ShoppingUuid = TypedUuid<Shopping>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShoppingState {
    /// Still being filled by the purchaser.
    Construction,

    /// Sent to the business as an order.
    Requested,
}

impl ShoppingState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Construction => "CONSTRUCTION",
            Self::Requested => "REQUESTED",
        }
    }
}

impl fmt::Display for ShoppingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShoppingState {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CONSTRUCTION" => Ok(Self::Construction),
            "REQUESTED" => Ok(Self::Requested),
            _ => Err(UnknownVariant::new("shopping state", value)),
        }
    }
}

/// The parts of a post frozen into a cart line when it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSnapshot {
    pub uuid: PostUuid,
    pub route_name: String,
    pub name: String,
    pub price: Option<u64>,
    pub discount: Option<u64>,
    pub currency: Option<PostCurrency>,
    pub images: Vec<Image>,
}

impl From<&Post> for PostSnapshot {
    fn from(post: &Post) -> Self {
        Self {
            uuid: post.uuid,
            route_name: post.route_name.clone(),
            name: post.name.clone(),
            price: post.price,
            discount: post.discount,
            currency: post.currency,
            images: post.images.clone(),
        }
    }
}

/// A post in a cart and how many units of it were added.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingPost {
    pub post: PostSnapshot,
    pub count: u64,
    pub last_updated_date: Timestamp,
}

/// Shopping Model
#[derive(Debug, Clone, PartialEq)]
pub struct Shopping {
    pub uuid: ShoppingUuid,
    pub purchaser_uuid: UserUuid,
    pub route_name: String,
    pub state: ShoppingState,
    pub posts: Vec<ShoppingPost>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
