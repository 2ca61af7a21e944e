//! Delete Business Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{businesses::into_status_error, extensions::*, models::MessageResponse, state::State};

/// Delete Business Handler
///
/// Deletes the business together with its posts and carts.
#[endpoint(
    tags("businesses"),
    summary = "Delete Business",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Business deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Business not found"),
    ),
)]
#[tracing::instrument(
    name = "businesses.delete",
    skip(user, route_name, depot),
    fields(user_uuid = tracing::field::Empty, route_name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    route_name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let route_name = route_name.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("route_name", tracing::field::display(&route_name));

    state
        .app
        .businesses
        .delete_business(user.into(), &route_name)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user, route_name = %route_name, "deleted business");

    Ok(Json(MessageResponse::new("Business deleted successfully")))
}
