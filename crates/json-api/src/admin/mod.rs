//! Admin
//!
//! User management and plan purchase validation; every route requires the admin role.

mod handlers;

pub(crate) use handlers::*;
