//! Owned Get Business Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use market_app::domain::businesses::data::BusinessScope;

use crate::{
    businesses::{into_status_error, models::BusinessResponse},
    extensions::*,
    state::State,
};

/// Owned Get Business Handler
///
/// Also returns the business when it is hidden.
#[endpoint(
    tags("businesses"),
    summary = "Get Own Business",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    route_name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<BusinessResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let business = state
        .app
        .businesses
        .get_business(
            &route_name.into_inner(),
            BusinessScope::Owner(user.into_inner().into()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(business.into()))
}
