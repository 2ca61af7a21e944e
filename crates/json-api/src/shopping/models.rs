//! Shopping Models

use market_app::domain::shopping::models::{PostSnapshot, Shopping, ShoppingPost};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ImageModel, images_from_domain};

/// The post as it was when it was added to the cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostSnapshotResponse {
    pub uuid: Uuid,
    pub route_name: String,
    pub name: String,
    pub price: Option<u64>,
    pub discount: Option<u64>,
    pub currency: Option<String>,
    pub images: Vec<ImageModel>,
}

impl From<PostSnapshot> for PostSnapshotResponse {
    fn from(post: PostSnapshot) -> Self {
        Self {
            uuid: post.uuid.into_uuid(),
            route_name: post.route_name,
            name: post.name,
            price: post.price,
            discount: post.discount,
            currency: post.currency.map(|currency| currency.to_string()),
            images: images_from_domain(post.images),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShoppingPostResponse {
    pub post: PostSnapshotResponse,
    pub count: u64,
    pub last_updated_date: String,
}

impl From<ShoppingPost> for ShoppingPostResponse {
    fn from(line: ShoppingPost) -> Self {
        Self {
            post: line.post.into(),
            count: line.count,
            last_updated_date: line.last_updated_date.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShoppingResponse {
    pub uuid: Uuid,
    pub purchaser_uuid: Uuid,
    pub route_name: String,

    /// `CONSTRUCTION` or `REQUESTED`
    pub state: String,

    pub posts: Vec<ShoppingPostResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Shopping> for ShoppingResponse {
    fn from(shopping: Shopping) -> Self {
        Self {
            uuid: shopping.uuid.into_uuid(),
            purchaser_uuid: shopping.purchaser_uuid.into_uuid(),
            route_name: shopping.route_name,
            state: shopping.state.to_string(),
            posts: shopping.posts.into_iter().map(Into::into).collect(),
            created_at: shopping.created_at.to_string(),
            updated_at: shopping.updated_at.to_string(),
        }
    }
}
