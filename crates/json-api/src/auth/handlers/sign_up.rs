//! Sign Up Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use market_app::auth::NewAccount;

use crate::{auth::into_status_error, extensions::*, models::MessageResponse, state::State};

/// Sign Up Request
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,

    /// Defaults to `true`
    #[serde(default)]
    pub can_create_business: Option<bool>,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("can_create_business", &self.can_create_business)
            .finish()
    }
}

impl From<SignUpRequest> for NewAccount {
    fn from(request: SignUpRequest) -> Self {
        NewAccount {
            name: request.name,
            email: request.email,
            password: request.password,
            can_create_business: request.can_create_business,
        }
    }
}

/// Sign Up Handler
///
/// Registers an account and sends its validation code by e-mail.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignUpRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .sign_up(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user.uuid, "user registered");

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new("User registered successfully")))
}
