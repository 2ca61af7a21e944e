//! Posts Data

use serde_json::Value;
use smallvec::SmallVec;

use crate::domain::{
    images::Image,
    posts::models::{PostClothingSize, PostColor, PostCurrency, REVIEW_BUCKETS},
    users::models::UserUuid,
};

/// New Post Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPost {
    pub route_name: String,
    pub name: String,
    pub description: String,
    pub details: Option<String>,
    pub price: Option<u64>,
    pub discount: Option<u64>,
    pub currency: Option<PostCurrency>,
    pub amount_available: Option<u64>,
    pub colors: Vec<PostColor>,
    pub highlights: Vec<String>,
    pub hidden: bool,
    pub post_categories_tags: Vec<String>,
    pub clothing_sizes: Vec<PostClothingSize>,
    pub images: Vec<Image>,
    pub post_page_layout: Option<Value>,
}

/// Post Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostUpdate {
    pub currency: Option<PostCurrency>,
    pub description: Option<String>,
    pub images: Option<Vec<Image>>,
    pub price: Option<u64>,
    pub amount_available: Option<u64>,
    pub clothing_sizes: Option<Vec<PostClothingSize>>,
    pub colors: Option<Vec<PostColor>>,
    pub details: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub hidden: Option<bool>,
    pub name: Option<String>,
    pub reviews: Option<[u64; REVIEW_BUCKETS]>,
    pub post_categories_tags: Option<Vec<String>>,
    pub discount: Option<u64>,
    pub post_page_layout: Option<Value>,
}

/// How the tags of a [`PostFilter`] are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagMatch {
    /// The post carries every tag.
    #[default]
    Every,

    /// The post carries at least one of the tags.
    Some,
}

/// Post listing filter. Unset or empty fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    /// Case-insensitive substring of the post name.
    pub search: Option<String>,

    pub route_names: SmallVec<[String; 3]>,
    pub hidden: Option<bool>,
    pub hidden_business: Option<bool>,
    pub created_by: Option<UserUuid>,
    pub post_categories_tags: SmallVec<[String; 3]>,
    pub post_categories_method: TagMatch,
}

/// Who is reading a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    /// Anyone; hidden posts and posts of hidden businesses are invisible.
    Public,

    /// The owner, who sees everything they created.
    Owner(UserUuid),
}
