//! Public Get Business Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use market_app::domain::businesses::data::BusinessScope;

use crate::{
    businesses::{into_status_error, models::BusinessResponse},
    extensions::*,
    state::State,
};

/// Public Get Business Handler
#[endpoint(
    tags("businesses"),
    summary = "Get Business",
    responses(
        (status_code = StatusCode::OK, description = "Business"),
        (status_code = StatusCode::NOT_FOUND, description = "Business not found"),
    ),
)]
pub(crate) async fn handler(
    route_name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<BusinessResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let business = state
        .app
        .businesses
        .get_business(&route_name.into_inner(), BusinessScope::Public)
        .await
        .map_err(into_status_error)?;

    Ok(Json(business.into()))
}

#[cfg(test)]
mod tests {
    use market_app::domain::businesses::{BusinessesServiceError, MockBusinessesService};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, public_service};

    use super::{super::tests::make_business, *};

    fn make_service(businesses: MockBusinessesService) -> Service {
        public_service(
            Mocks {
                businesses,
                ..Mocks::default()
            },
            Router::with_path("business/{route_name}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_public_get_uses_public_scope() -> TestResult {
        let mut businesses = MockBusinessesService::new();

        businesses
            .expect_get_business()
            .once()
            .withf(|route_name, scope| route_name == "tienda" && *scope == BusinessScope::Public)
            .return_once(|route_name, _| Ok(make_business(route_name, TEST_USER_UUID)));

        let mut res = TestClient::get("http://example.com/business/tienda")
            .send(&make_service(businesses))
            .await;

        let body: BusinessResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.category, "clothing");
        assert_eq!(body.created_by, TEST_USER_UUID.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_hidden_business_returns_404() -> TestResult {
        let mut businesses = MockBusinessesService::new();

        businesses
            .expect_get_business()
            .once()
            .return_once(|_, _| Err(BusinessesServiceError::NotFound));

        let res = TestClient::get("http://example.com/business/oculta")
            .send(&make_service(businesses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
