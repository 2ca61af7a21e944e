//! Business Shopping Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use market_app::domain::shopping::models::ShoppingState;

use crate::{
    extensions::*,
    shopping::{into_status_error, models::ShoppingResponse},
    state::State,
};

/// Business Shopping Handler
///
/// Carts placed in one of the user's businesses, optionally only those in `state`.
#[endpoint(
    tags("businesses"),
    summary = "List Business Shopping",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Carts"),
        (status_code = StatusCode::NOT_FOUND, description = "Business not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown state"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    route_name: PathParam<String>,
    state: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ShoppingResponse>>, StatusError> {
    let app_state = depot.obtain_or_500::<Arc<State>>()?;

    let shopping_state = state
        .into_inner()
        .map(|state| state.parse::<ShoppingState>())
        .transpose()
        .or_400("Unknown shopping state")?;

    let carts = app_state
        .app
        .shopping
        .list_for_business(
            user.into_inner().into(),
            &route_name.into_inner(),
            shopping_state,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(carts.into_iter().map(Into::into).collect()))
}
