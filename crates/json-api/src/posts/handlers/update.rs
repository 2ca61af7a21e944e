//! Update Post Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use market_app::domain::posts::data::PostUpdate;

use crate::{
    extensions::*,
    posts::{
        into_status_error,
        models::{PostResponse, UpdatePostRequest},
    },
    state::State,
};

/// Update Post Handler
#[endpoint(
    tags("posts"),
    summary = "Update Post",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Post updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Post not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Too many images for the plan"),
    ),
)]
#[tracing::instrument(
    name = "posts.update",
    skip(user, post, json, depot),
    fields(user_uuid = tracing::field::Empty, post_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    post: PathParam<Uuid>,
    json: JsonBody<UpdatePostRequest>,
    depot: &mut Depot,
) -> Result<Json<PostResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let post = post.into_inner();
    let update = PostUpdate::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("post_uuid", tracing::field::display(post));

    let post = state
        .app
        .posts
        .update_post(user.into(), post.into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(post_uuid = %post.uuid, "updated post");

    Ok(Json(post.into()))
}
