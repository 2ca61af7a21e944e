//! Create Post Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use market_app::domain::posts::data::NewPost;

use crate::{
    extensions::*,
    posts::{
        into_status_error,
        models::{CreatePostRequest, PostResponse},
    },
    state::State,
};

/// Create Post Handler
///
/// Publishes a post in one of the user's businesses.
#[endpoint(
    tags("posts"),
    summary = "Create Post",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Post created"),
        (status_code = StatusCode::NOT_FOUND, description = "Business not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Plan limit reached"),
    ),
)]
#[tracing::instrument(
    name = "posts.create",
    skip(user, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        route_name = tracing::field::Empty,
        images_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<CreatePostRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PostResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let post = NewPost::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("route_name", tracing::field::display(&post.route_name));
    span.record("images_count", tracing::field::display(post.images.len()));

    let post = state
        .app
        .posts
        .create_post(user.into(), post)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/posts/{}", post.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(post_uuid = %post.uuid, route_name = %post.route_name, "created post");

    Ok(Json(post.into()))
}
