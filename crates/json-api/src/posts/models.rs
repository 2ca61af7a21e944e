//! Post Models

use std::{fmt::Display, str::FromStr};

use market_app::domain::posts::{
    data::{NewPost, PostUpdate},
    models::{Post, PostClothingSize, PostColor, PostCurrency, REVIEW_BUCKETS},
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::{
    extensions::*,
    models::{ImageModel, images_from_domain, images_into_domain},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostResponse {
    pub uuid: Uuid,
    pub route_name: String,
    pub created_by: Uuid,
    pub name: String,
    pub description: String,
    pub details: Option<String>,

    /// Price in minor units of `currency`
    pub price: Option<u64>,

    /// Discount in minor units of `currency`
    pub discount: Option<u64>,

    /// `CUP`, `MLC` or `USD`
    pub currency: Option<String>,

    /// Units in stock; absent when the stock is unlimited
    pub amount_available: Option<u64>,

    /// Number of one to five star reviews
    pub reviews: Vec<u64>,

    pub colors: Vec<String>,
    pub highlights: Vec<String>,
    pub hidden: bool,
    pub hidden_business: bool,
    pub post_categories_tags: Vec<String>,
    pub clothing_sizes: Vec<String>,
    pub images: Vec<ImageModel>,
    pub post_page_layout: Option<Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            uuid: post.uuid.into_uuid(),
            route_name: post.route_name,
            created_by: post.created_by.into_uuid(),
            name: post.name,
            description: post.description,
            details: post.details,
            price: post.price,
            discount: post.discount,
            currency: post.currency.map(|currency| currency.to_string()),
            amount_available: post.amount_available,
            reviews: post.reviews.to_vec(),
            colors: post.colors.iter().map(ToString::to_string).collect(),
            highlights: post.highlights,
            hidden: post.hidden,
            hidden_business: post.hidden_business,
            post_categories_tags: post.post_categories_tags,
            clothing_sizes: post.clothing_sizes.iter().map(ToString::to_string).collect(),
            images: images_from_domain(post.images),
            post_page_layout: post.post_page_layout,
            created_at: post.created_at.to_string(),
            updated_at: post.updated_at.to_string(),
        }
    }
}

/// Create Post Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostRequest {
    /// Route name of the business the post is published in
    pub route_name: String,

    pub name: String,
    pub description: String,

    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub discount: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amount_available: Option<u64>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub post_categories_tags: SmallVec<[String; 3]>,
    #[serde(default)]
    pub clothing_sizes: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageModel>,
    #[serde(default)]
    pub post_page_layout: Option<Value>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = StatusError;

    fn try_from(request: CreatePostRequest) -> Result<Self, Self::Error> {
        Ok(NewPost {
            route_name: request.route_name,
            name: request.name,
            description: request.description,
            details: request.details,
            price: request.price,
            discount: request.discount,
            currency: parse_optional::<PostCurrency>(request.currency, "Unknown currency")?,
            amount_available: request.amount_available,
            colors: parse_each::<PostColor>(request.colors, "Unknown color")?,
            highlights: request.highlights,
            hidden: request.hidden,
            post_categories_tags: request.post_categories_tags.into_vec(),
            clothing_sizes: parse_each::<PostClothingSize>(
                request.clothing_sizes,
                "Unknown clothing size",
            )?,
            images: images_into_domain(request.images),
            post_page_layout: request.post_page_layout,
        })
    }
}

/// Update Post Request
///
/// Absent fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePostRequest {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ImageModel>>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub amount_available: Option<u64>,
    #[serde(default)]
    pub clothing_sizes: Option<Vec<String>>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,

    /// Exactly five counts, one per star rating
    #[serde(default)]
    pub reviews: Option<Vec<u64>>,

    #[serde(default)]
    pub post_categories_tags: Option<SmallVec<[String; 3]>>,
    #[serde(default)]
    pub discount: Option<u64>,
    #[serde(default)]
    pub post_page_layout: Option<Value>,
}

impl TryFrom<UpdatePostRequest> for PostUpdate {
    type Error = StatusError;

    fn try_from(request: UpdatePostRequest) -> Result<Self, Self::Error> {
        let reviews = request
            .reviews
            .map(<[u64; REVIEW_BUCKETS]>::try_from)
            .transpose()
            .map_err(|reviews| {
                StatusError::bad_request()
                    .brief("Invalid reviews")
                    .detail(format!(
                        "expected {REVIEW_BUCKETS} review counts, got {}",
                        reviews.len()
                    ))
            })?;

        Ok(PostUpdate {
            currency: parse_optional::<PostCurrency>(request.currency, "Unknown currency")?,
            description: request.description,
            images: request.images.map(images_into_domain),
            price: request.price,
            amount_available: request.amount_available,
            clothing_sizes: request
                .clothing_sizes
                .map(|sizes| parse_each::<PostClothingSize>(sizes, "Unknown clothing size"))
                .transpose()?,
            colors: request
                .colors
                .map(|colors| parse_each::<PostColor>(colors, "Unknown color"))
                .transpose()?,
            details: request.details,
            highlights: request.highlights,
            hidden: request.hidden,
            name: request.name,
            reviews,
            post_categories_tags: request.post_categories_tags.map(SmallVec::into_vec),
            discount: request.discount,
            post_page_layout: request.post_page_layout,
        })
    }
}

fn parse_optional<T>(value: Option<String>, brief: &str) -> Result<Option<T>, StatusError>
where
    T: FromStr,
    T::Err: Display,
{
    value.map(|value| value.parse::<T>()).transpose().or_400(brief)
}

fn parse_each<T>(values: Vec<String>, brief: &str) -> Result<Vec<T>, StatusError>
where
    T: FromStr,
    T::Err: Display,
{
    values
        .iter()
        .map(|value| value.parse::<T>())
        .collect::<Result<Vec<_>, _>>()
        .or_400(brief)
}

/// Splits a comma-separated query value, dropping blanks.
pub(crate) fn split_list(value: Option<String>) -> SmallVec<[String; 3]> {
    value
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn create_request_parses_storefront_labels() -> TestResult {
        let request: CreatePostRequest = serde_json::from_value(json!({
            "routeName": "tienda",
            "name": "Camisa",
            "description": "Camisa de algodón",
            "currency": "MLC",
            "colors": ["black", "white"],
            "clothingSizes": ["M", "2XL"],
        }))?;

        let post = NewPost::try_from(request)?;

        assert_eq!(post.currency, Some(PostCurrency::Mlc));
        assert_eq!(post.colors, vec![PostColor::Black, PostColor::White]);
        assert_eq!(
            post.clothing_sizes,
            vec![PostClothingSize::M, PostClothingSize::Xxl]
        );
        assert!(!post.hidden);

        Ok(())
    }

    #[test]
    fn unknown_color_is_rejected() {
        let request = CreatePostRequest {
            colors: vec!["purple".to_string()],
            ..CreatePostRequest::default()
        };

        let error = NewPost::try_from(request).err();

        assert_eq!(error.map(|e| e.brief), Some("Unknown color".to_string()));
    }

    #[test]
    fn reviews_need_five_buckets() {
        let request = UpdatePostRequest {
            reviews: Some(vec![1, 2, 3]),
            ..UpdatePostRequest::default()
        };

        assert!(PostUpdate::try_from(request).is_err());

        let request = UpdatePostRequest {
            reviews: Some(vec![0, 0, 1, 4, 9]),
            ..UpdatePostRequest::default()
        };

        assert_eq!(
            PostUpdate::try_from(request).ok().and_then(|update| update.reviews),
            Some([0, 0, 1, 4, 9])
        );
    }

    #[test]
    fn split_list_trims_and_skips_blanks() {
        let expected: SmallVec<[String; 3]> = smallvec!["rojo".to_string(), "camisa".to_string()];

        assert_eq!(split_list(Some(" rojo, ,camisa,".to_string())), expected);
        assert!(split_list(None).is_empty());
    }
}
