//! Current Payment Plan Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{into_status_error, models::PaymentPlanResponse},
};

/// Current Payment Plan Handler
///
/// Returns the plan the user is on, with its limits.
#[endpoint(
    tags("users"),
    summary = "Current Payment Plan",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PaymentPlanResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let plan = state
        .app
        .users
        .current_plan(user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(plan.into()))
}
