//! Duplicate Post Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    posts::{into_status_error, models::PostResponse},
    state::State,
};

/// Duplicate Post Handler
///
/// Copies an owned post without its reviews and images.
#[endpoint(
    tags("posts"),
    summary = "Duplicate Post",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Post duplicated"),
        (status_code = StatusCode::NOT_FOUND, description = "Post not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Plan limit reached"),
    ),
)]
#[tracing::instrument(
    name = "posts.duplicate",
    skip(user, post, depot, res),
    fields(user_uuid = tracing::field::Empty, post_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    post: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PostResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let post = post.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("post_uuid", tracing::field::display(post));

    let copy = state
        .app
        .posts
        .duplicate_post(user.into(), post.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/posts/{}", copy.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(post_uuid = %post, copy_uuid = %copy.uuid, "duplicated post");

    Ok(Json(copy.into()))
}
