//! Users Data

use crate::domain::images::Image;

/// User Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub profile_image: Option<Image>,
}

/// Account row written on sign-up.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub can_create_business: bool,
}
