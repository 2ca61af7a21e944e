//! Delete Post Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, models::MessageResponse, posts::into_status_error, state::State};

/// Delete Post Handler
#[endpoint(
    tags("posts"),
    summary = "Delete Post",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Post deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Post not found"),
    ),
)]
#[tracing::instrument(
    name = "posts.delete",
    skip(user, post, depot),
    fields(user_uuid = tracing::field::Empty, post_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    post: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let post = post.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("post_uuid", tracing::field::display(post));

    state
        .app
        .posts
        .delete_post(user.into(), post.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(post_uuid = %post, "deleted post");

    Ok(Json(MessageResponse::new("Post deleted successfully")))
}
