//! Shopping Index Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use crate::{
    extensions::*,
    shopping::{into_status_error, models::ShoppingResponse},
    state::State,
};

#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShoppingQuery {
    /// Business the carts belong to
    pub route_name: String,
}

/// Shopping Index Handler
///
/// The signed-in user's carts for one business.
#[endpoint(tags("shopping"), summary = "List Shopping", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    query: ShoppingQuery,
    depot: &mut Depot,
) -> Result<Json<Vec<ShoppingResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let purchaser = depot.current_user_or_401()?.uuid;

    let carts = state
        .app
        .shopping
        .list_shopping(purchaser, &query.route_name)
        .await
        .map_err(into_status_error)?;

    Ok(Json(carts.into_iter().map(Into::into).collect()))
}
