//! Owned Business Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToParameters, extract::PathParam},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use market_app::{domain::businesses::data::BusinessFilter, pagination::PageRequest};

use crate::{
    businesses::{into_status_error, models::BusinessResponse},
    extensions::*,
    pagination::PaginatedResponse,
    state::State,
};

#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct OwnedBusinessQuery {
    /// Case-insensitive part of the business name
    pub search: Option<String>,

    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Owned Business Index Handler
///
/// Lists the user's businesses, hidden ones included.
#[endpoint(
    tags("businesses"),
    summary = "List Own Businesses",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    query: OwnedBusinessQuery,
    depot: &mut Depot,
) -> Result<Json<PaginatedResponse<BusinessResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = BusinessFilter {
        created_by: Some(user.into_inner().into()),
        search: query.search,
        ..BusinessFilter::default()
    };

    let page = state
        .app
        .businesses
        .list_businesses(filter, PageRequest::new(query.page, query.limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use market_app::{domain::businesses::MockBusinessesService, pagination::Paginated};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::{super::tests::make_business, *};

    #[tokio::test]
    async fn test_owned_index_filters_by_owner_without_hiding() -> TestResult {
        let mut businesses = MockBusinessesService::new();

        businesses
            .expect_list_businesses()
            .once()
            .withf(|filter, page| {
                filter.created_by == Some(TEST_USER_UUID)
                    && filter.hidden.is_none()
                    && *page == PageRequest::default()
            })
            .return_once(|_, page| {
                let mut hidden = make_business("oculta", TEST_USER_UUID);
                hidden.hidden = true;

                Ok(Paginated::new(vec![hidden], 1, page))
            });

        let service = service(
            Mocks {
                businesses,
                ..Mocks::default()
            },
            Router::with_path("user/{user}/business").get(handler),
        );

        let mut res = TestClient::get(format!("http://example.com/user/{TEST_USER_UUID}/business"))
            .send(&service)
            .await;

        let body: PaginatedResponse<BusinessResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.data[0].hidden);

        Ok(())
    }
}
