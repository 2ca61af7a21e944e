//! Get Shopping Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    shopping::{into_status_error, models::ShoppingResponse},
    state::State,
};

/// Get Shopping Handler
#[endpoint(
    tags("shopping"),
    summary = "Get Shopping",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Shopping not found"),
    ),
)]
pub(crate) async fn handler(
    shopping: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ShoppingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let purchaser = depot.current_user_or_401()?.uuid;

    let cart = state
        .app
        .shopping
        .get_shopping(purchaser, shopping.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
