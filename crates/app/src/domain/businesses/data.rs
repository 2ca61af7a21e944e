//! Businesses Data

use serde_json::Value;

use crate::domain::{
    businesses::models::{AboutUsPage, BusinessCategory, PostCategory, SocialLinks},
    images::Image,
    users::models::UserUuid,
};

/// New Business Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBusiness {
    pub name: String,
    pub route_name: String,
    pub category: BusinessCategory,
}

/// Business Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessUpdate {
    pub hidden: Option<bool>,
    pub social_links: Option<SocialLinks>,
    pub banner_images: Option<Vec<Image>>,
    pub name: Option<String>,
    pub route_name: Option<String>,
    pub logo: Option<Image>,
    pub layouts: Option<Value>,
    pub post_categories: Option<Vec<PostCategory>>,
    pub about_us_page: Option<AboutUsPage>,
    pub whatsapp_phone_number: Option<String>,
}

/// Business listing filter. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessFilter {
    pub created_by: Option<UserUuid>,
    pub route_name: Option<String>,

    /// Case-insensitive substring of the business name.
    pub search: Option<String>,

    pub hidden: Option<bool>,
}

/// Who is reading a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessScope {
    /// Anyone; hidden businesses are invisible.
    Public,

    /// The owner, who also sees hidden businesses.
    Owner(UserUuid),
}
