//! Purchase Payment Plan Handler

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

use market_app::domain::plans::models::{PlanPurchase, PlanType};

use crate::{
    extensions::*,
    state::State,
    users::{into_status_error, models::PlanHistoryEntryResponse},
};

/// Purchase Plan Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PurchasePlanRequest {
    /// `free`, `beginner`, `professional` or `company`
    pub plan_type: String,

    /// Payment reference an admin checks before activating the plan
    #[serde(default)]
    pub validation_purchase_code: Option<String>,
}

/// Purchase Payment Plan Handler
///
/// Records the purchase; the plan becomes current once an admin validates it.
#[endpoint(
    tags("users"),
    summary = "Purchase Payment Plan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Purchase recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown plan type"),
    ),
)]
#[tracing::instrument(
    name = "users.purchase_plan",
    skip(user, json, depot, res),
    fields(user_uuid = tracing::field::Empty, plan_type = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<PurchasePlanRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PlanHistoryEntryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let user = user.into_inner();

    let plan_type = request
        .plan_type
        .parse::<PlanType>()
        .or_400("Unknown plan type")?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("plan_type", tracing::field::display(plan_type));

    let entry = state
        .app
        .users
        .purchase_plan(
            user.into(),
            PlanPurchase {
                plan_type,
                validation_purchase_code: request.validation_purchase_code,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(entry.into()))
}
