//! Admin Set Plan Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use market_app::domain::plans::models::PlanStatus;

use crate::{
    extensions::*,
    state::State,
    users::{into_status_error, models::PlanHistoryEntryResponse},
};

/// Set Plan Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetPlanStatusRequest {
    /// `current`, `validatingPurchase` or `historical`
    pub status: String,
}

/// Admin Set Plan Status Handler
///
/// Validates or retires a plan purchase. Making an entry current retires
/// the user's other current entries.
#[endpoint(
    tags("admin"),
    summary = "Set Plan Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Plan entry updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Plan entry not found for the user"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
#[tracing::instrument(
    name = "admin.set_plan_status",
    skip(user, plan, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        plan_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    plan: PathParam<Uuid>,
    json: JsonBody<SetPlanStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<PlanHistoryEntryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let plan = plan.into_inner();

    let status = json
        .into_inner()
        .status
        .parse::<PlanStatus>()
        .or_400("Unknown plan status")?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("plan_uuid", tracing::field::display(plan));
    span.record("status", status.as_str());

    let entry = state
        .app
        .users
        .set_plan_status(user.into(), plan.into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user, plan_uuid = %plan, status = status.as_str(), "set plan status");

    Ok(Json(entry.into()))
}
