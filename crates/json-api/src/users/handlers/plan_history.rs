//! Payment Plan History Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{into_status_error, models::PlanHistoryEntryResponse},
};

/// Payment Plan History Handler
///
/// Every plan the user held or asked for, oldest first.
#[endpoint(
    tags("users"),
    summary = "Payment Plan History",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<PlanHistoryEntryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let history = state
        .app
        .users
        .plan_history(user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(history.into_iter().map(Into::into).collect()))
}
