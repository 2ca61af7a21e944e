//! Shared request and response models.

use market_app::domain::images::Image;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Plain confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Reference to an image hosted elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageModel {
    /// Image URL
    pub src: String,
    pub width: u32,
    pub height: u32,

    /// Link opened when the image is clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl From<Image> for ImageModel {
    fn from(image: Image) -> Self {
        Self {
            src: image.src,
            width: image.width,
            height: image.height,
            href: image.href,
        }
    }
}

impl From<ImageModel> for Image {
    fn from(image: ImageModel) -> Self {
        Self {
            src: image.src,
            width: image.width,
            height: image.height,
            href: image.href,
        }
    }
}

pub(crate) fn images_into_domain(images: Vec<ImageModel>) -> Vec<Image> {
    images.into_iter().map(Into::into).collect()
}

pub(crate) fn images_from_domain(images: Vec<Image>) -> Vec<ImageModel> {
    images.into_iter().map(Into::into).collect()
}
