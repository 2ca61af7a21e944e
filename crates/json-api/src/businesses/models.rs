//! Business Models

use market_app::domain::businesses::{
    data::{BusinessUpdate, NewBusiness},
    models::{AboutUsPage, Business, BusinessCategory, PostCategory, SocialLinks},
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    extensions::*,
    models::{ImageModel, images_from_domain, images_into_domain},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PostCategoryModel {
    pub label: String,
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl From<PostCategory> for PostCategoryModel {
    fn from(category: PostCategory) -> Self {
        Self {
            label: category.label,
            tag: category.tag,
            hidden: category.hidden,
        }
    }
}

impl From<PostCategoryModel> for PostCategory {
    fn from(category: PostCategoryModel) -> Self {
        Self {
            label: category.label,
            tag: category.tag,
            hidden: category.hidden,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct SocialLinksModel {
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

impl From<SocialLinks> for SocialLinksModel {
    fn from(links: SocialLinks) -> Self {
        Self {
            face: links.face,
            instagram: links.instagram,
            twitter: links.twitter,
            linkedin: links.linkedin,
            youtube: links.youtube,
        }
    }
}

impl From<SocialLinksModel> for SocialLinks {
    fn from(links: SocialLinksModel) -> Self {
        Self {
            face: links.face,
            instagram: links.instagram,
            twitter: links.twitter,
            linkedin: links.linkedin,
            youtube: links.youtube,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AboutUsPageModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<AboutUsPage> for AboutUsPageModel {
    fn from(page: AboutUsPage) -> Self {
        Self {
            visible: page.visible,
            title: page.title,
            description: page.description,
        }
    }
}

impl From<AboutUsPageModel> for AboutUsPage {
    fn from(page: AboutUsPageModel) -> Self {
        Self {
            visible: page.visible,
            title: page.title,
            description: page.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BusinessResponse {
    pub uuid: Uuid,
    pub name: String,
    pub route_name: String,

    /// `food`, `tool`, `clothing` or `service`
    pub category: String,

    pub created_by: Uuid,
    pub hidden: bool,
    pub banner_images: Vec<ImageModel>,
    pub logo: Option<ImageModel>,
    pub post_categories: Vec<PostCategoryModel>,
    pub social_links: SocialLinksModel,

    /// Free-form storefront layout settings
    pub layouts: Value,

    pub about_us_page: Option<AboutUsPageModel>,

    #[serde(rename = "whatsAppPhoneNumber")]
    pub whatsapp_phone_number: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<Business> for BusinessResponse {
    fn from(business: Business) -> Self {
        Self {
            uuid: business.uuid.into_uuid(),
            name: business.name,
            route_name: business.route_name,
            category: business.category.to_string(),
            created_by: business.created_by.into_uuid(),
            hidden: business.hidden,
            banner_images: images_from_domain(business.banner_images),
            logo: business.logo.map(Into::into),
            post_categories: business
                .post_categories
                .into_iter()
                .map(Into::into)
                .collect(),
            social_links: business.social_links.into(),
            layouts: business.layouts,
            about_us_page: business.about_us_page.map(Into::into),
            whatsapp_phone_number: business.whatsapp_phone_number,
            created_at: business.created_at.to_string(),
            updated_at: business.updated_at.to_string(),
        }
    }
}

/// Create Business Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBusinessRequest {
    pub name: String,

    /// Lower-case slug identifying the storefront, e.g. `my-shop`
    pub route_name: String,

    /// `food`, `tool`, `clothing` or `service`
    pub category: String,
}

impl TryFrom<CreateBusinessRequest> for NewBusiness {
    type Error = StatusError;

    fn try_from(request: CreateBusinessRequest) -> Result<Self, Self::Error> {
        let category = request
            .category
            .parse::<BusinessCategory>()
            .or_400("Unknown business category")?;

        Ok(NewBusiness {
            name: request.name,
            route_name: request.route_name,
            category,
        })
    }
}

/// Update Business Request
///
/// Absent fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBusinessRequest {
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub social_links: Option<SocialLinksModel>,
    #[serde(default)]
    pub banner_images: Option<Vec<ImageModel>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub route_name: Option<String>,
    #[serde(default)]
    pub logo: Option<ImageModel>,
    #[serde(default)]
    pub layouts: Option<Value>,
    #[serde(default)]
    pub post_categories: Option<Vec<PostCategoryModel>>,
    #[serde(default)]
    pub about_us_page: Option<AboutUsPageModel>,
    #[serde(default, rename = "whatsAppPhoneNumber")]
    pub whatsapp_phone_number: Option<String>,
}

impl From<UpdateBusinessRequest> for BusinessUpdate {
    fn from(request: UpdateBusinessRequest) -> Self {
        BusinessUpdate {
            hidden: request.hidden,
            social_links: request.social_links.map(Into::into),
            banner_images: request.banner_images.map(images_into_domain),
            name: request.name,
            route_name: request.route_name,
            logo: request.logo.map(Into::into),
            layouts: request.layouts,
            post_categories: request
                .post_categories
                .map(|categories| categories.into_iter().map(Into::into).collect()),
            about_us_page: request.about_us_page.map(Into::into),
            whatsapp_phone_number: request.whatsapp_phone_number,
        }
    }
}
