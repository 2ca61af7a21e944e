//! Public Post Index Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use market_app::{
    domain::posts::data::{PostFilter, TagMatch},
    pagination::PageRequest,
};

use crate::{
    extensions::*,
    pagination::PaginatedResponse,
    posts::{
        into_status_error,
        models::{PostResponse, split_list},
    },
    state::State,
};

/// Public post listing query.
#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostQuery {
    /// Case-insensitive part of the post name
    pub search: Option<String>,

    /// Comma-separated business route names
    pub route_names: Option<String>,

    /// Comma-separated category tags
    pub post_categories_tags: Option<String>,

    /// `every` (default) or `some`
    pub post_categories_method: Option<String>,

    /// Also list hidden posts and posts of hidden businesses
    pub include_hidden: Option<bool>,

    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Public Post Index Handler
#[endpoint(
    tags("posts"),
    summary = "List Posts",
    responses(
        (status_code = StatusCode::OK, description = "Posts"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown tag matching method"),
    ),
)]
pub(crate) async fn handler(
    query: PostQuery,
    depot: &mut Depot,
) -> Result<Json<PaginatedResponse<PostResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let post_categories_method = match query.post_categories_method.as_deref() {
        None | Some("every") => TagMatch::Every,
        Some("some") => TagMatch::Some,
        Some(other) => {
            return Err(StatusError::bad_request()
                .brief("Unknown post categories method")
                .detail(format!("expected `every` or `some`, got `{other}`")));
        }
    };

    let visible_only = !query.include_hidden.unwrap_or(false);

    let filter = PostFilter {
        search: query.search,
        route_names: split_list(query.route_names),
        hidden: visible_only.then_some(false),
        hidden_business: visible_only.then_some(false),
        created_by: None,
        post_categories_tags: split_list(query.post_categories_tags),
        post_categories_method,
    };

    let page = state
        .app
        .posts
        .list_posts(filter, PageRequest::new(query.page, query.limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
