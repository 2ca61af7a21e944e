//! Depot helper extensions.

use std::any::Any;

use market_app::domain::users::models::User;
use salvo::prelude::{Depot, StatusError};

const CURRENT_USER_DEPOT_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Remember the user the request is authenticated as.
    fn insert_current_user(&mut self, user: User);

    fn current_user_or_401(&self) -> Result<&User, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: User) {
        self.insert(CURRENT_USER_DEPOT_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<&User, StatusError> {
        self.get::<User>(CURRENT_USER_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Unauthorized"))
    }
}
