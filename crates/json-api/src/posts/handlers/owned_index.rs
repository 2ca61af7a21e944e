//! Owned Post Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToParameters, extract::PathParam},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use market_app::{domain::posts::data::PostFilter, pagination::PageRequest};

use crate::{
    extensions::*,
    pagination::PaginatedResponse,
    posts::{
        into_status_error,
        models::{PostResponse, split_list},
    },
    state::State,
};

#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnedPostQuery {
    /// Case-insensitive part of the post name
    pub search: Option<String>,

    /// Comma-separated business route names
    pub route_names: Option<String>,

    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Owned Post Index Handler
///
/// Lists every post the user created, hidden ones included.
#[endpoint(tags("posts"), summary = "List Own Posts", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    query: OwnedPostQuery,
    depot: &mut Depot,
) -> Result<Json<PaginatedResponse<PostResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = PostFilter {
        search: query.search,
        route_names: split_list(query.route_names),
        created_by: Some(user.into_inner().into()),
        ..PostFilter::default()
    };

    let page = state
        .app
        .posts
        .list_posts(filter, PageRequest::new(query.page, query.limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
