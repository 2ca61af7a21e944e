//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use market_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        businesses::MockBusinessesService,
        posts::MockPostsService,
        shopping::MockShoppingService,
        users::{
            MockUsersService,
            models::{User, UserRole, UserUuid},
        },
    },
};
use salvo::{affix_state::inject, async_trait, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Service mocks; any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub users: MockUsersService,
    pub businesses: MockBusinessesService,
    pub posts: MockPostsService,
    pub shopping: MockShoppingService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            businesses: Arc::new(self.businesses),
            posts: Arc::new(self.posts),
            shopping: Arc::new(self.shopping),
        })
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> User {
    User {
        uuid,
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        role: UserRole::User,
        validated: true,
        can_create_business: true,
        profile_image: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Stores a fixed user as the authenticated one.
struct InjectUser(User);

#[async_trait]
impl Handler for InjectUser {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_current_user(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

/// A service for `route` with `mocks` as the app and `user` signed in.
pub(crate) fn service_as(mocks: Mocks, user: User, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectUser(user))
            .push(route),
    )
}

/// Like [`service_as`], signed in as the default test user.
pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    service_as(mocks, make_user(TEST_USER_UUID), route)
}

/// A service for `route` without a signed-in user.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}
