//! Admin User Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    pagination::{PaginatedResponse, page_request},
    state::State,
    users::{into_status_error, models::UserResponse},
};

/// Admin User Index Handler
///
/// Lists regular users, newest first.
#[endpoint(tags("admin"), summary = "List Users", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<PaginatedResponse<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users(page_request(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(users.into()))
}
