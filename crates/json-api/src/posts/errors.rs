//! Post Errors

use salvo::http::StatusError;
use tracing::error;

use market_app::domain::posts::PostsServiceError;

pub(crate) fn into_status_error(error: PostsServiceError) -> StatusError {
    match error {
        PostsServiceError::NotFound => {
            StatusError::not_found().brief("Post not found or you are not access to this post")
        }
        PostsServiceError::BusinessNotFound => StatusError::not_found().brief("Business not found"),
        PostsServiceError::AlreadyExists => StatusError::bad_request().brief("Post already exists"),
        PostsServiceError::InvalidReference
        | PostsServiceError::MissingRequiredData
        | PostsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid post payload")
        }
        PostsServiceError::PlanLimitExceeded(limit) => StatusError::forbidden()
            .brief("Plan limit exceeded")
            .detail(limit.to_string()),
        PostsServiceError::Sql(source) => {
            error!("posts storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
