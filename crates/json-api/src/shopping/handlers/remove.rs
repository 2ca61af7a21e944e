//! Remove From Shopping Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::*,
    models::MessageResponse,
    shopping::into_status_error,
    state::State,
};

#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveQuery {
    /// Business whose cart is changed
    pub route_name: String,

    /// Post to take out; the whole cart is cleared when absent
    pub post_uuid: Option<Uuid>,
}

/// Remove From Shopping Handler
///
/// Takes one post, or every post, out of the cart under construction and
/// returns the units to stock.
#[endpoint(
    tags("shopping"),
    summary = "Remove From Shopping",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "shopping.remove",
    skip(query, depot),
    fields(
        user_uuid = tracing::field::Empty,
        route_name = tracing::field::Empty,
        post_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    query: RemoveQuery,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let purchaser = depot.current_user_or_401()?.uuid;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(purchaser));
    span.record("route_name", tracing::field::display(&query.route_name));

    match query.post_uuid {
        Some(post) => {
            span.record("post_uuid", tracing::field::display(post));

            state
                .app
                .shopping
                .remove_post(purchaser, &query.route_name, post.into())
                .await
                .map_err(into_status_error)?;

            Ok(Json(MessageResponse::new("Post removed from shopping")))
        }
        None => {
            state
                .app
                .shopping
                .clear(purchaser, &query.route_name)
                .await
                .map_err(into_status_error)?;

            Ok(Json(MessageResponse::new("Shopping cleared")))
        }
    }
}

#[cfg(test)]
mod tests {
    use market_app::domain::shopping::MockShoppingService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::*;

    fn make_service(shopping: MockShoppingService) -> Service {
        service(
            Mocks {
                shopping,
                ..Mocks::default()
            },
            Router::with_path("shopping").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_post_uuid_removes_single_post() -> TestResult {
        let post = Uuid::now_v7();
        let mut shopping = MockShoppingService::new();

        shopping
            .expect_remove_post()
            .once()
            .withf(move |purchaser, route_name, p| {
                *purchaser == TEST_USER_UUID && route_name == "tienda" && p.into_uuid() == post
            })
            .return_once(|_, _, _| Ok(()));

        shopping.expect_clear().never();

        let mut res = TestClient::delete(format!(
            "http://example.com/shopping?routeName=tienda&postUuid={post}"
        ))
        .send(&make_service(shopping))
        .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Post removed from shopping");

        Ok(())
    }

    #[tokio::test]
    async fn test_without_post_uuid_clears_cart() -> TestResult {
        let mut shopping = MockShoppingService::new();

        shopping
            .expect_clear()
            .once()
            .withf(|purchaser, route_name| *purchaser == TEST_USER_UUID && route_name == "tienda")
            .return_once(|_, _| Ok(()));

        shopping.expect_remove_post().never();

        let res = TestClient::delete("http://example.com/shopping?routeName=tienda")
            .send(&make_service(shopping))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
