//! User Handlers

pub(crate) mod get;
pub(crate) mod plan;
pub(crate) mod plan_history;
pub(crate) mod purchase_plan;
pub(crate) mod update;
