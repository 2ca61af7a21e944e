//! Plan Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{UnknownVariant, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Plan History Entry UUID
pub type PlanEntryUuid = TypedUuid<PlanHistoryEntry>;

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanType {
    Free,
    Beginner,
    Professional,
    Company,
}

impl PlanType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Beginner => "beginner",
            Self::Professional => "professional",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "free" => Ok(Self::Free),
            "beginner" => Ok(Self::Beginner),
            "professional" => Ok(Self::Professional),
            "company" => Ok(Self::Company),
            _ => Err(UnknownVariant::new("plan type", value)),
        }
    }
}

/// Lifecycle of a plan history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanStatus {
    Current,
    ValidatingPurchase,
    Historical,
}

impl PlanStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::ValidatingPurchase => "validatingPurchase",
            Self::Historical => "historical",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "current" => Ok(Self::Current),
            "validatingPurchase" => Ok(Self::ValidatingPurchase),
            "historical" => Ok(Self::Historical),
            _ => Err(UnknownVariant::new("plan status", value)),
        }
    }
}

/// Pricing and limits of a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentPlan {
    pub plan_type: PlanType,

    /// Monthly price in CUP.
    pub price: u64,

    /// Length of the trial period in days, when the tier has one.
    pub trial_days: Option<u32>,

    pub max_business_by_user: u64,
    pub max_posts_by_business: u64,
    pub max_images_by_post: usize,
    pub max_images_by_business_banner: usize,
}

const FREE: PaymentPlan = PaymentPlan {
    plan_type: PlanType::Free,
    price: 0,
    trial_days: None,
    max_business_by_user: 1,
    max_posts_by_business: 20,
    max_images_by_post: 1,
    max_images_by_business_banner: 1,
};

const BEGINNER: PaymentPlan = PaymentPlan {
    plan_type: PlanType::Beginner,
    price: 1_500,
    trial_days: Some(30),
    max_business_by_user: 1,
    max_posts_by_business: 100,
    max_images_by_post: 3,
    max_images_by_business_banner: 3,
};

const PROFESSIONAL: PaymentPlan = PaymentPlan {
    plan_type: PlanType::Professional,
    price: 3_000,
    trial_days: None,
    max_business_by_user: 3,
    max_posts_by_business: 1_000,
    max_images_by_post: 5,
    max_images_by_business_banner: 5,
};

const COMPANY: PaymentPlan = PaymentPlan {
    plan_type: PlanType::Company,
    price: 6_000,
    trial_days: None,
    max_business_by_user: 10,
    max_posts_by_business: 10_000,
    max_images_by_post: 10,
    max_images_by_business_banner: 10,
};

/// A limit of the current plan that an operation would exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanLimit {
    #[error("the plan allows at most {max} businesses")]
    Businesses { max: u64 },

    #[error("the plan allows at most {max} posts per business")]
    Posts { max: u64 },

    #[error("the plan allows at most {max} images per post")]
    PostImages { max: usize },

    #[error("the plan allows at most {max} banner images")]
    BannerImages { max: usize },
}

impl PaymentPlan {
    #[must_use]
    pub const fn of(plan_type: PlanType) -> Self {
        match plan_type {
            PlanType::Free => FREE,
            PlanType::Beginner => BEGINNER,
            PlanType::Professional => PROFESSIONAL,
            PlanType::Company => COMPANY,
        }
    }

    /// Checks whether one more business fits next to `existing` ones.
    pub fn ensure_business_slot(&self, existing: u64) -> Result<(), PlanLimit> {
        if existing >= self.max_business_by_user {
            return Err(PlanLimit::Businesses {
                max: self.max_business_by_user,
            });
        }

        Ok(())
    }

    /// Checks whether one more post fits in a business holding `existing` posts.
    pub fn ensure_post_slot(&self, existing: u64) -> Result<(), PlanLimit> {
        if existing >= self.max_posts_by_business {
            return Err(PlanLimit::Posts {
                max: self.max_posts_by_business,
            });
        }

        Ok(())
    }

    pub fn ensure_post_images(&self, count: usize) -> Result<(), PlanLimit> {
        if count > self.max_images_by_post {
            return Err(PlanLimit::PostImages {
                max: self.max_images_by_post,
            });
        }

        Ok(())
    }

    pub fn ensure_banner_images(&self, count: usize) -> Result<(), PlanLimit> {
        if count > self.max_images_by_business_banner {
            return Err(PlanLimit::BannerImages {
                max: self.max_images_by_business_banner,
            });
        }

        Ok(())
    }
}

/// One entry of a user's plan history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanHistoryEntry {
    pub uuid: PlanEntryUuid,
    pub user_uuid: UserUuid,
    pub plan_type: PlanType,
    pub date_of_purchase: Timestamp,
    pub trial_mode: bool,
    pub status: PlanStatus,
    pub validation_purchase_code: Option<String>,
}

/// Plan purchase request awaiting validation by an admin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanPurchase {
    pub plan_type: PlanType,
    pub validation_purchase_code: Option<String>,
}
