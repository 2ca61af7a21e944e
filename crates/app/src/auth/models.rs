//! Auth data models.

use std::fmt;

use uuid::Uuid;

use crate::domain::users::models::{User, UserUuid};

/// Sign-up payload.
#[derive(Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,

    /// Defaults to `true` when not given.
    pub can_create_business: Option<bool>,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("can_create_business", &self.can_create_business)
            .finish()
    }
}

/// Result of a successful sign-in, carrying the raw token exactly once.
#[derive(Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("token", &"**redacted**")
            .field("user", &self.user)
            .finish()
    }
}

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub user_uuid: UserUuid,
    pub token_hash: Vec<u8>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub token_hash: Vec<u8>,
}
