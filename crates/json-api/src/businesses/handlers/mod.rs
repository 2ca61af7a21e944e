//! Business Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod owned_get;
pub(crate) mod owned_index;
pub(crate) mod route_names;
pub(crate) mod shopping;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use market_app::domain::{
        businesses::models::{Business, BusinessCategory, BusinessUuid},
        users::models::UserUuid,
    };
    use serde_json::json;

    pub(super) fn make_business(route_name: &str, owner: UserUuid) -> Business {
        Business {
            uuid: BusinessUuid::new(),
            name: "Tienda".to_string(),
            route_name: route_name.to_string(),
            category: BusinessCategory::Clothing,
            created_by: owner,
            hidden: false,
            banner_images: Vec::new(),
            logo: None,
            post_categories: Vec::new(),
            social_links: Default::default(),
            layouts: json!({}),
            about_us_page: None,
            whatsapp_phone_number: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
