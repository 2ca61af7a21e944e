//! Make Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    shopping::{into_status_error, models::ShoppingResponse},
    state::State,
};

/// Make Order Handler
///
/// Turns the cart under construction into a requested order.
#[endpoint(
    tags("shopping"),
    summary = "Make Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order requested"),
        (status_code = StatusCode::NOT_FOUND, description = "No cart under construction"),
    ),
)]
#[tracing::instrument(
    name = "shopping.make_order",
    skip(shopping, depot),
    fields(user_uuid = tracing::field::Empty, shopping_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    shopping: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ShoppingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let purchaser = depot.current_user_or_401()?.uuid;
    let shopping = shopping.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(purchaser));
    span.record("shopping_uuid", tracing::field::display(shopping));

    let order = state
        .app
        .shopping
        .make_order(purchaser, shopping.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
