//! Add To Shopping Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use market_app::domain::shopping::data::AddToShopping;

use crate::{
    extensions::*,
    observability::record_stock_shortfall,
    shopping::into_status_error,
    state::State,
};

/// Shown when stock ran short and fewer units than requested were added.
const PARTIAL_ADD_MESSAGE: &str = "Por falta de disponibilidad en el stock no se han podido agregar la cantidad solicitada. Se han agregado solamente las cantidades disponibles.";

/// Add To Shopping Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToShoppingRequest {
    /// Business the post belongs to
    pub route_name: String,

    pub post_uuid: Uuid,

    /// Units to add, at least 1
    #[serde(default = "one")]
    pub amount_to_add: u64,
}

const fn one() -> u64 {
    1
}

/// Add To Shopping Response
///
/// Empty unless fewer units than requested could be added.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToShoppingResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Add To Shopping Handler
///
/// Takes units of a post from stock and puts them in the user's cart for its business.
#[endpoint(
    tags("shopping"),
    summary = "Add Post To Shopping",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Post added"),
        (status_code = StatusCode::NOT_FOUND, description = "Post not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid amount or out of stock"),
    ),
)]
#[tracing::instrument(
    name = "shopping.add",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        post_uuid = tracing::field::Empty,
        amount_to_add = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddToShoppingRequest>,
    depot: &mut Depot,
) -> Result<Json<AddToShoppingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let purchaser = depot.current_user_or_401()?.uuid;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(purchaser));
    span.record("post_uuid", tracing::field::display(request.post_uuid));
    span.record("amount_to_add", request.amount_to_add);

    let added = state
        .app
        .shopping
        .add_post(
            purchaser,
            AddToShopping {
                route_name: request.route_name,
                post: request.post_uuid.into(),
                amount_to_add: request.amount_to_add,
            },
        )
        .await
        .map_err(into_status_error)?;

    if !added.is_partial() {
        return Ok(Json(AddToShoppingResponse::default()));
    }

    record_stock_shortfall();

    Ok(Json(AddToShoppingResponse {
        message: Some(PARTIAL_ADD_MESSAGE.to_string()),
    }))
}
