//! User Models

use market_app::domain::{
    plans::models::{PaymentPlan, PlanHistoryEntry},
    users::models::User,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ImageModel;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,

    /// `user` or `admin`
    pub role: String,

    pub validated: bool,
    pub can_create_business: bool,
    pub profile_image: Option<ImageModel>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            validated: user.validated,
            can_create_business: user.can_create_business,
            profile_image: user.profile_image.map(Into::into),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Pricing and limits of a plan.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentPlanResponse {
    #[serde(rename = "type")]
    pub plan_type: String,

    /// Monthly price in CUP
    pub price: u64,

    /// Trial length in days
    pub trial_time: Option<u32>,

    pub max_business_by_user: u64,
    pub max_posts_by_business: u64,
    pub max_images_by_post: usize,
    pub max_images_by_business_banner: usize,
}

impl From<PaymentPlan> for PaymentPlanResponse {
    fn from(plan: PaymentPlan) -> Self {
        Self {
            plan_type: plan.plan_type.to_string(),
            price: plan.price,
            trial_time: plan.trial_days,
            max_business_by_user: plan.max_business_by_user,
            max_posts_by_business: plan.max_posts_by_business,
            max_images_by_post: plan.max_images_by_post,
            max_images_by_business_banner: plan.max_images_by_business_banner,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanHistoryEntryResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub plan_type: String,
    pub date_of_purchase: String,
    pub trial_mode: bool,

    /// `current`, `validatingPurchase` or `historical`
    pub status: String,

    pub validation_purchase_code: Option<String>,
}

impl From<PlanHistoryEntry> for PlanHistoryEntryResponse {
    fn from(entry: PlanHistoryEntry) -> Self {
        Self {
            uuid: entry.uuid.into_uuid(),
            user_uuid: entry.user_uuid.into_uuid(),
            plan_type: entry.plan_type.to_string(),
            date_of_purchase: entry.date_of_purchase.to_string(),
            trial_mode: entry.trial_mode,
            status: entry.status.as_str().to_string(),
            validation_purchase_code: entry.validation_purchase_code,
        }
    }
}
