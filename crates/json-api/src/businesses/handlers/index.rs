//! Public Business Index Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use market_app::{domain::businesses::data::BusinessFilter, pagination::PageRequest};

use crate::{
    businesses::{into_status_error, models::BusinessResponse},
    extensions::*,
    pagination::PaginatedResponse,
    state::State,
};

/// Public business listing query.
#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BusinessQuery {
    /// Only the business with this route name
    pub route_name: Option<String>,

    /// Case-insensitive part of the business name
    pub search: Option<String>,

    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Public Business Index Handler
///
/// Lists visible businesses, newest first.
#[endpoint(tags("businesses"), summary = "List Businesses")]
pub(crate) async fn handler(
    query: BusinessQuery,
    depot: &mut Depot,
) -> Result<Json<PaginatedResponse<BusinessResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = BusinessFilter {
        route_name: query.route_name,
        search: query.search,
        hidden: Some(false),
        ..BusinessFilter::default()
    };

    let page = state
        .app
        .businesses
        .list_businesses(filter, PageRequest::new(query.page, query.limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
