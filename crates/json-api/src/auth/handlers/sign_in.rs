//! Sign In Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use market_app::auth::IssuedSession;

use crate::{auth::into_status_error, extensions::*, state::State, users::models::UserResponse};

/// Sign In Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed In Response
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct SignInResponse {
    /// Bearer token for the new session
    pub token: String,

    pub user: UserResponse,
}

impl std::fmt::Debug for SignInResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInResponse")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

impl From<IssuedSession> for SignInResponse {
    fn from(session: IssuedSession) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}

/// Sign In Handler
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Session opened"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials or user not validated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignInRequest>,
    depot: &mut Depot,
) -> Result<Json<SignInResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .sign_in(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %session.user.uuid, "session opened");

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use market_app::auth::{AuthServiceError, MockAuthService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_user, public_service};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            Mocks {
                auth,
                ..Mocks::default()
            },
            Router::with_path("auth/sign-in").post(handler),
        )
    }

    #[tokio::test]
    async fn test_sign_in_returns_token_and_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_in()
            .once()
            .withf(|email, password| email == "ana@example.com" && password == "s3cret-pass")
            .return_once(|_, _| {
                Ok(IssuedSession {
                    token: "mk_v1_abc.def".to_string(),
                    user: make_user(TEST_USER_UUID),
                })
            });

        let mut res = TestClient::post("http://example.com/auth/sign-in")
            .json(&json!({ "email": "ana@example.com", "password": "s3cret-pass" }))
            .send(&make_service(auth))
            .await;

        let body: SignInResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "mk_v1_abc.def");
        assert_eq!(body.user.uuid, TEST_USER_UUID.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_unvalidated_user_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_in()
            .once()
            .return_once(|_, _| Err(AuthServiceError::NotValidated));

        let res = TestClient::post("http://example.com/auth/sign-in")
            .json(&json!({ "email": "ana@example.com", "password": "s3cret-pass" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
