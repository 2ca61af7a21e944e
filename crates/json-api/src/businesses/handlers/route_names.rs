//! Business Route Names Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{businesses::into_status_error, extensions::*, state::State};

/// Business Route Names Handler
///
/// Route names of all the user's businesses, unpaginated.
#[endpoint(
    tags("businesses"),
    summary = "All Route Names",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<String>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let route_names = state
        .app
        .businesses
        .route_names(user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(route_names))
}

#[cfg(test)]
mod tests {
    use market_app::domain::businesses::MockBusinessesService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::*;

    #[tokio::test]
    async fn test_route_names_are_listed() -> TestResult {
        let mut businesses = MockBusinessesService::new();

        businesses
            .expect_route_names()
            .once()
            .withf(|owner| *owner == TEST_USER_UUID)
            .return_once(|_| Ok(vec!["tienda".to_string(), "taller".to_string()]));

        let service = service(
            Mocks {
                businesses,
                ..Mocks::default()
            },
            Router::with_path("user/{user}/business/all-route-names").get(handler),
        );

        let mut res = TestClient::get(format!(
            "http://example.com/user/{TEST_USER_UUID}/business/all-route-names"
        ))
        .send(&service)
        .await;

        let body: Vec<String> = res.take_json().await?;

        assert_eq!(body, vec!["tienda", "taller"]);

        Ok(())
    }
}
