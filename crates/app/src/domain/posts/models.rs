//! Post Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{UnknownVariant, images::Image, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Post UUID
pub type PostUuid = TypedUuid<Post>;

/// Number of star buckets in a post's reviews.
pub const REVIEW_BUCKETS: usize = 5;

macro_rules! storage_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant::new($kind, value)),
                }
            }
        }
    };
}

storage_enum!(
    /// Currency a post is priced in.
    PostCurrency, "currency", {
        Cup => "CUP",
        Mlc => "MLC",
        Usd => "USD",
    }
);

storage_enum!(PostColor, "color", {
    White => "white",
    Gray => "gray",
    Black => "black",
});

storage_enum!(PostClothingSize, "clothing size", {
    Xxs => "XXS",
    Xs => "XS",
    S => "S",
    M => "M",
    L => "L",
    Xl => "XL",
    Xxl => "2XL",
    Xxxl => "3XL",
});

/// Post Model
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub uuid: PostUuid,
    pub route_name: String,
    pub created_by: UserUuid,
    pub name: String,
    pub description: String,
    pub details: Option<String>,

    /// Price in minor units of `currency`.
    pub price: Option<u64>,

    pub discount: Option<u64>,
    pub currency: Option<PostCurrency>,

    /// Units in stock; `None` means the stock is not tracked.
    pub amount_available: Option<u64>,

    /// Review counts per star rating, one to five.
    pub reviews: [u64; REVIEW_BUCKETS],

    pub colors: Vec<PostColor>,
    pub highlights: Vec<String>,
    pub hidden: bool,

    /// Mirror of the owning business' `hidden` flag.
    pub hidden_business: bool,

    pub post_categories_tags: Vec<String>,
    pub clothing_sizes: Vec<PostClothingSize>,
    pub images: Vec<Image>,
    pub post_page_layout: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
