//! Test context for service-level integration tests.

use std::sync::Arc;

use sqlx::query_scalar;

use crate::{
    auth::{AuthService, AuthServiceError, NewAccount, PgAuthService},
    database::Db,
    domain::{
        businesses::{
            BusinessesService, PgBusinessesService,
            data::NewBusiness,
            models::{Business, BusinessCategory},
        },
        plans::models::{PlanHistoryEntry, PlanPurchase, PlanStatus, PlanType},
        posts::{
            PgPostsService, PostsService,
            data::NewPost,
            models::{Post, PostCurrency},
        },
        shopping::PgShoppingService,
        users::{
            PgUsersRepository, PgUsersService, UsersService, UsersServiceError,
            data::NewUser,
            models::{User, UserUuid},
        },
    },
    mail::LogMailer,
};

use super::db::TestDb;

/// Stored for fixture users; it is not a valid Argon2 hash so they cannot sign in.
const UNUSABLE_PASSWORD_HASH: &str = "!";

pub(crate) struct TestContext {
    pub db: TestDb,
    pub auth: PgAuthService,
    pub users: PgUsersService,
    pub businesses: PgBusinessesService,
    pub posts: PgPostsService,
    pub shopping: PgShoppingService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            auth: PgAuthService::new(db.clone(), Arc::new(LogMailer)),
            users: PgUsersService::new(db.clone()),
            businesses: PgBusinessesService::new(db.clone()),
            posts: PgPostsService::new(db.clone()),
            shopping: PgShoppingService::new(db),
            db: test_db,
        }
    }

    /// A database handle for building services with custom collaborators.
    pub fn db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }

    /// Create a validated user that may create businesses.
    pub async fn create_user(&self, email: &str) -> User {
        self.create_user_with(email, true).await
    }

    /// Create a validated user with the given business permission.
    pub async fn create_user_with(&self, email: &str, can_create_business: bool) -> User {
        let repository = PgUsersRepository::new();

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .expect("Failed to begin transaction");

        let user = repository
            .create_user(
                &mut tx,
                NewUser {
                    name: email.split('@').next().unwrap_or(email).to_string(),
                    email: email.to_string(),
                    password_hash: UNUSABLE_PASSWORD_HASH.to_string(),
                    can_create_business,
                },
            )
            .await
            .expect("Failed to create test user");

        repository
            .set_validated(&mut tx, user.uuid)
            .await
            .expect("Failed to validate test user");

        tx.commit().await.expect("Failed to commit test user");

        User {
            validated: true,
            ..user
        }
    }

    /// Put the user on a plan, bypassing the purchase validation.
    pub async fn grant_plan(
        &self,
        user: UserUuid,
        plan_type: PlanType,
    ) -> Result<PlanHistoryEntry, UsersServiceError> {
        let entry = self
            .users
            .purchase_plan(
                user,
                PlanPurchase {
                    plan_type,
                    validation_purchase_code: None,
                },
            )
            .await?;

        self.users
            .set_plan_status(user, entry.uuid, PlanStatus::Current)
            .await
    }

    pub async fn create_business(&self, owner: UserUuid, route_name: &str) -> Business {
        self.businesses
            .create_business(
                owner,
                NewBusiness {
                    name: format!("Business {route_name}"),
                    route_name: route_name.to_string(),
                    category: BusinessCategory::Clothing,
                },
            )
            .await
            .expect("Failed to create test business")
    }

    /// Create a visible post priced at 15.00 CUP; `None` stock is unlimited.
    pub async fn create_post(
        &self,
        owner: UserUuid,
        route_name: &str,
        amount_available: Option<u64>,
    ) -> Post {
        self.posts
            .create_post(
                owner,
                NewPost {
                    route_name: route_name.to_string(),
                    name: "Camisa".to_string(),
                    description: "Camisa de algodón".to_string(),
                    price: Some(1_500),
                    currency: Some(PostCurrency::Cup),
                    amount_available,
                    ..NewPost::default()
                },
            )
            .await
            .expect("Failed to create test post")
    }

    /// Most recent validation code issued to the user.
    pub async fn validation_code(&self, user: UserUuid) -> String {
        query_scalar::<_, String>(
            "SELECT code FROM validation_codes WHERE user_uuid = $1 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user.into_uuid())
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to fetch validation code")
    }

    /// Register an account through the auth service and validate it.
    pub async fn signed_up_and_validated(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthServiceError> {
        let user = self
            .auth
            .sign_up(NewAccount {
                name: "Ana".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                can_create_business: None,
            })
            .await?;

        let code = self.validation_code(user.uuid).await;

        self.auth.validate(email, &code).await
    }
}
