//! Owned Get Post Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use market_app::domain::posts::data::PostScope;

use crate::{
    extensions::*,
    posts::{into_status_error, models::PostResponse},
    state::State,
};

/// Owned Get Post Handler
#[endpoint(tags("posts"), summary = "Get Own Post", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    post: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PostResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let post = state
        .app
        .posts
        .get_post(
            post.into_inner().into(),
            PostScope::Owner(user.into_inner().into()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(post.into()))
}

#[cfg(test)]
mod tests {
    use market_app::domain::posts::{MockPostsService, models::PostUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::{super::tests::make_post, *};

    #[tokio::test]
    async fn test_owned_get_sees_hidden_post() -> TestResult {
        let uuid = PostUuid::new();
        let mut posts = MockPostsService::new();

        posts
            .expect_get_post()
            .once()
            .withf(move |post, scope| *post == uuid && *scope == PostScope::Owner(TEST_USER_UUID))
            .return_once(|post, _| {
                let mut post = make_post(post, TEST_USER_UUID);
                post.hidden = true;

                Ok(post)
            });

        let service = service(
            Mocks {
                posts,
                ..Mocks::default()
            },
            Router::with_path("user/{user}/posts/{post}").get(handler),
        );

        let mut res =
            TestClient::get(format!("http://example.com/user/{TEST_USER_UUID}/posts/{uuid}"))
                .send(&service)
                .await;

        let body: PostResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.hidden);

        Ok(())
    }
}
