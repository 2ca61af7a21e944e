//! Create Business Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use market_app::domain::businesses::data::NewBusiness;

use crate::{
    businesses::{
        into_status_error,
        models::{BusinessResponse, CreateBusinessRequest},
    },
    extensions::*,
    state::State,
};

/// Create Business Handler
#[endpoint(
    tags("businesses"),
    summary = "Create Business",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Business created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or taken route name"),
        (status_code = StatusCode::FORBIDDEN, description = "Not allowed or plan limit reached"),
    ),
)]
#[tracing::instrument(
    name = "businesses.create",
    skip(user, json, depot, res),
    fields(user_uuid = tracing::field::Empty, route_name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<CreateBusinessRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BusinessResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let business = NewBusiness::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("route_name", tracing::field::display(&business.route_name));

    let business = state
        .app
        .businesses
        .create_business(user.into(), business)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/user/{user}/business/{}", business.route_name),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    tracing::info!(user_uuid = %user, route_name = %business.route_name, "created business");

    Ok(Json(business.into()))
}
