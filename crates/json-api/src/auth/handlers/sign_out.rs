//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{into_status_error, middleware::extract_bearer_token},
    extensions::*,
    models::MessageResponse,
    state::State,
};

/// Sign Out Handler
///
/// Closes the session of the bearer token.
#[endpoint(
    tags("auth"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session closed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "The session does not exist"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = extract_bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("The session does not exist"))?;

    state
        .app
        .auth
        .sign_out(token)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new(
        "the session was closed successfully",
    )))
}
