//! Admin Handlers

pub(crate) mod delete_user;
pub(crate) mod set_plan_status;
pub(crate) mod users;
