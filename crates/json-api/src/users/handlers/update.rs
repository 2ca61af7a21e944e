//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use market_app::domain::users::data::UserUpdate;

use crate::{
    extensions::*,
    models::ImageModel,
    state::State,
    users::{into_status_error, models::UserResponse},
};

/// Update User Request
///
/// Absent fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub profile_image: Option<ImageModel>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            name: request.name,
            profile_image: request.profile_image.map(Into::into),
        }
    }
}

/// Update User Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not the signed-in user"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "users.update",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let user = state
        .app
        .users
        .update_user(user.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use market_app::domain::{images::Image, users::MockUsersService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_user, service};

    use super::*;

    #[tokio::test]
    async fn test_update_user_passes_only_given_fields() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_user()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID
                    && update.name.is_none()
                    && update.profile_image
                        == Some(Image {
                            src: "https://img.example.com/ana.png".to_string(),
                            width: 64,
                            height: 64,
                            href: None,
                        })
            })
            .return_once(|uuid, _| Ok(make_user(uuid)));

        let service = service(
            Mocks {
                users,
                ..Mocks::default()
            },
            Router::with_path("user/{user}").put(handler),
        );

        let mut res = TestClient::put(format!("http://example.com/user/{TEST_USER_UUID}"))
            .json(&json!({
                "profileImage": { "src": "https://img.example.com/ana.png", "width": 64, "height": 64 }
            }))
            .send(&service)
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, TEST_USER_UUID.into_uuid());

        Ok(())
    }
}
