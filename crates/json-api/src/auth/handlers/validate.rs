//! Validate Account Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::into_status_error, extensions::*, models::MessageResponse, state::State};

/// Validate Account Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateRequest {
    pub email: String,

    /// Code received by e-mail
    pub code: String,
}

/// Validate Account Handler
#[endpoint(
    tags("auth"),
    summary = "Validate Account",
    responses(
        (status_code = StatusCode::CREATED, description = "User validated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown user"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown validation code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let user = state
        .app
        .auth
        .validate(&request.email, &request.code)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user.uuid, "user validated");

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new("User validated successfully")))
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
            Router::with_path("auth/validate").post(handler),
        )
    }

    #[tokio::test]
    async fn test_validate_returns_201() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_validate()
            .once()
            .withf(|email, code| email == "ana@example.com" && code == "A1B2")
            .return_once(|_, _| Ok(make_user(TEST_USER_UUID)));

        let mut res = TestClient::post("http://example.com/auth/validate")
            .json(&json!({ "email": "ana@example.com", "code": "A1B2" }))
            .send(&make_service(auth))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.message, "User validated successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_code_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_validate()
            .once()
            .return_once(|_, _| Err(AuthServiceError::UnknownValidationCode));

        let res = TestClient::post("http://example.com/auth/validate")
            .json(&json!({ "email": "ana@example.com", "code": "FFFF" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_validate()
            .once()
            .return_once(|_, _| Err(AuthServiceError::UnknownUser));

        let res = TestClient::post("http://example.com/auth/validate")
            .json(&json!({ "email": "nobody@example.com", "code": "A1B2" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
