//! Public Get Post Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use market_app::domain::posts::data::PostScope;

use crate::{
    extensions::*,
    posts::{into_status_error, models::PostResponse},
    state::State,
};

/// Public Get Post Handler
#[endpoint(
    tags("posts"),
    summary = "Get Post",
    responses(
        (status_code = StatusCode::OK, description = "Post"),
        (status_code = StatusCode::NOT_FOUND, description = "Post not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid UUID"),
    ),
)]
pub(crate) async fn handler(
    post: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PostResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let post = state
        .app
        .posts
        .get_post(post.into_inner().into(), PostScope::Public)
        .await
        .map_err(into_status_error)?;

    Ok(Json(post.into()))
}
