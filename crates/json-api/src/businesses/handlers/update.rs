//! Update Business Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    businesses::{
        into_status_error,
        models::{BusinessResponse, UpdateBusinessRequest},
    },
    extensions::*,
    state::State,
};

/// Update Business Handler
///
/// Hiding a business hides its posts; renaming it moves its posts and carts.
#[endpoint(
    tags("businesses"),
    summary = "Update Business",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Business updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Business not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or taken route name"),
        (status_code = StatusCode::FORBIDDEN, description = "Too many banner images for the plan"),
    ),
)]
#[tracing::instrument(
    name = "businesses.update",
    skip(user, route_name, json, depot),
    fields(user_uuid = tracing::field::Empty, route_name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    route_name: PathParam<String>,
    json: JsonBody<UpdateBusinessRequest>,
    depot: &mut Depot,
) -> Result<Json<BusinessResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let route_name = route_name.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("route_name", tracing::field::display(&route_name));

    let business = state
        .app
        .businesses
        .update_business(user.into(), &route_name, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(business.into()))
}

#[cfg(test)]
mod tests {
    use market_app::domain::businesses::{
        BusinessesServiceError, MockBusinessesService, data::BusinessUpdate,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::{super::tests::make_business, *};

    fn make_service(businesses: MockBusinessesService) -> Service {
        service(
            Mocks {
                businesses,
                ..Mocks::default()
            },
            Router::with_path("user/{user}/business/{route_name}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_business_passes_whitelisted_fields() -> TestResult {
        let mut businesses = MockBusinessesService::new();

        businesses
            .expect_update_business()
            .once()
            .withf(|owner, route_name, update| {
                *owner == TEST_USER_UUID
                    && route_name == "tienda"
                    && *update
                        == BusinessUpdate {
                            hidden: Some(true),
                            route_name: Some("tienda-nueva".to_string()),
                            ..BusinessUpdate::default()
                        }
            })
            .return_once(|owner, _, update| {
                let mut business = make_business("tienda-nueva", owner);
                business.hidden = update.hidden.unwrap_or_default();

                Ok(business)
            });

        let mut res = TestClient::put(format!(
            "http://example.com/user/{TEST_USER_UUID}/business/tienda"
        ))
        .json(&json!({ "hidden": true, "routeName": "tienda-nueva", "createdBy": "someone" }))
        .send(&make_service(businesses))
        .await;

        let body: BusinessResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.route_name, "tienda-nueva");
        assert!(body.hidden);

        Ok(())
    }

    #[tokio::test]
    async fn test_taken_route_name_returns_400() -> TestResult {
        let mut businesses = MockBusinessesService::new();

        businesses
            .expect_update_business()
            .once()
            .return_once(|_, _, _| Err(BusinessesServiceError::AlreadyExists));

        let res = TestClient::put(format!(
            "http://example.com/user/{TEST_USER_UUID}/business/tienda"
        ))
        .json(&json!({ "routeName": "taller" }))
        .send(&make_service(businesses))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
