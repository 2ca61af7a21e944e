//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        plans::{
            PgPlansRepository,
            models::{PaymentPlan, PlanEntryUuid, PlanHistoryEntry, PlanPurchase, PlanStatus},
        },
        shopping::release_purchaser_carts,
        users::{
            data::UserUpdate,
            errors::UsersServiceError,
            models::{User, UserRole, UserUuid},
            repository::PgUsersRepository,
        },
    },
    pagination::{PageRequest, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    users: PgUsersRepository,
    plans: PgPlansRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            plans: PgPlansRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.users.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.users.update_user(&mut tx, user, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn current_plan(&self, user: UserUuid) -> Result<PaymentPlan, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        self.users.get_user(&mut tx, user).await?;

        let plan_type = self.plans.current_plan_type(&mut tx, user).await?;

        tx.commit().await?;

        Ok(PaymentPlan::of(plan_type))
    }

    async fn plan_history(
        &self,
        user: UserUuid,
    ) -> Result<Vec<PlanHistoryEntry>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        self.users.get_user(&mut tx, user).await?;

        let entries = self.plans.list_entries(&mut tx, user).await?;

        tx.commit().await?;

        Ok(entries)
    }

    async fn purchase_plan(
        &self,
        user: UserUuid,
        purchase: PlanPurchase,
    ) -> Result<PlanHistoryEntry, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        self.users.get_user(&mut tx, user).await?;

        let entry = self
            .plans
            .create_entry(
                &mut tx,
                user,
                purchase.plan_type,
                PlanStatus::ValidatingPurchase,
                purchase.validation_purchase_code.as_deref(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            user = %user,
            plan_type = %purchase.plan_type,
            "plan purchase awaiting validation"
        );

        Ok(entry)
    }

    async fn list_users(&self, page: PageRequest) -> Result<Paginated<User>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.users.list_users(&mut tx, UserRole::User, page).await?;
        let count = self.users.count_users(&mut tx, UserRole::User).await?;

        tx.commit().await?;

        Ok(Paginated::new(users, count, page))
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        // The user's carts go with the account, so their units go back first.
        release_purchaser_carts(&mut tx, user).await?;

        let rows_affected = self.users.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn set_plan_status(
        &self,
        user: UserUuid,
        entry: PlanEntryUuid,
        status: PlanStatus,
    ) -> Result<PlanHistoryEntry, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.plans.set_status(&mut tx, user, entry, status).await?;

        if status == PlanStatus::Current {
            self.plans.retire_current(&mut tx, user, entry).await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn promote(&self, email: &str) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let promoted = self.users.set_role(&mut tx, email, UserRole::Admin).await?;

        tx.commit().await?;

        Ok(promoted)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Updates the profile fields present in `update`.
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<User, UsersServiceError>;

    /// Plan the user is currently on. Users without a current entry are on the free plan.
    async fn current_plan(&self, user: UserUuid) -> Result<PaymentPlan, UsersServiceError>;

    /// Every plan the user ever held, oldest first.
    async fn plan_history(
        &self,
        user: UserUuid,
    ) -> Result<Vec<PlanHistoryEntry>, UsersServiceError>;

    /// Records a plan purchase that an admin still has to validate.
    async fn purchase_plan(
        &self,
        user: UserUuid,
        purchase: PlanPurchase,
    ) -> Result<PlanHistoryEntry, UsersServiceError>;

    /// Lists regular (non-admin) users, newest first.
    async fn list_users(&self, page: PageRequest) -> Result<Paginated<User>, UsersServiceError>;

    /// Deletes a user together with everything they own.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;

    /// Changes the status of one plan history entry.
    ///
    /// Making an entry `current` retires every other current entry of the user.
    async fn set_plan_status(
        &self,
        user: UserUuid,
        entry: PlanEntryUuid,
        status: PlanStatus,
    ) -> Result<PlanHistoryEntry, UsersServiceError>;

    /// Grants the admin role to the user with the given e-mail.
    async fn promote(&self, email: &str) -> Result<User, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            businesses::{BusinessesService, BusinessesServiceError, data::BusinessScope},
            images::Image,
            plans::models::PlanType,
            posts::{PostsService, PostsServiceError, data::PostScope},
            shopping::{ShoppingService, data::AddToShopping},
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn get_user_returns_created_user() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.create_user("ana@example.com").await;

        let user = ctx.users.get_user(created.uuid).await?;

        assert_eq!(user, created);
        assert_eq!(user.role, UserRole::User);

        Ok(())
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_user_only_touches_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.create_user("ana@example.com").await;

        let image = Image {
            src: "https://cdn.example.com/ana.png".to_string(),
            width: 64,
            height: 64,
            href: None,
        };

        let updated = ctx
            .users
            .update_user(
                created.uuid,
                UserUpdate {
                    name: None,
                    profile_image: Some(image.clone()),
                },
            )
            .await?;

        assert_eq!(updated.name, created.name);
        assert_eq!(updated.profile_image, Some(image));

        Ok(())
    }

    #[tokio::test]
    async fn current_plan_defaults_to_free() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ana@example.com").await;

        let plan = ctx.users.current_plan(user.uuid).await?;

        assert_eq!(plan, PaymentPlan::of(PlanType::Free));

        Ok(())
    }

    #[tokio::test]
    async fn purchased_plan_applies_once_validated() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ana@example.com").await;

        let entry = ctx
            .users
            .purchase_plan(
                user.uuid,
                PlanPurchase {
                    plan_type: PlanType::Professional,
                    validation_purchase_code: Some("TRX-1".to_string()),
                },
            )
            .await?;

        assert_eq!(entry.status, PlanStatus::ValidatingPurchase);
        assert!(!entry.trial_mode);
        assert_eq!(
            ctx.users.current_plan(user.uuid).await?.plan_type,
            PlanType::Free
        );

        ctx.users
            .set_plan_status(user.uuid, entry.uuid, PlanStatus::Current)
            .await?;

        assert_eq!(
            ctx.users.current_plan(user.uuid).await?.plan_type,
            PlanType::Professional
        );

        Ok(())
    }

    #[tokio::test]
    async fn making_a_plan_current_retires_the_previous_one() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ana@example.com").await;

        for plan_type in [PlanType::Beginner, PlanType::Company] {
            let entry = ctx
                .users
                .purchase_plan(
                    user.uuid,
                    PlanPurchase {
                        plan_type,
                        validation_purchase_code: None,
                    },
                )
                .await?;

            ctx.users
                .set_plan_status(user.uuid, entry.uuid, PlanStatus::Current)
                .await?;
        }

        let history = ctx.users.plan_history(user.uuid).await?;
        let current: Vec<PlanType> = history
            .iter()
            .filter(|entry| entry.status == PlanStatus::Current)
            .map(|entry| entry.plan_type)
            .collect();

        assert_eq!(current, vec![PlanType::Company]);

        Ok(())
    }

    #[tokio::test]
    async fn set_plan_status_of_another_user_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;
        let other = ctx.create_user("bob@example.com").await;

        let entry = ctx
            .users
            .purchase_plan(
                owner.uuid,
                PlanPurchase {
                    plan_type: PlanType::Beginner,
                    validation_purchase_code: None,
                },
            )
            .await?;

        let result = ctx
            .users
            .set_plan_status(other.uuid, entry.uuid, PlanStatus::Current)
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_users_excludes_admins() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ana@example.com").await;
        let admin = ctx.create_user("root@example.com").await;

        ctx.users.promote("ROOT@example.com").await?;

        let page = ctx.users.list_users(PageRequest::default()).await?;
        let uuids: Vec<UserUuid> = page.data.iter().map(|user| user.uuid).collect();

        assert_eq!(uuids, vec![user.uuid]);
        assert_eq!(page.data_count, 1);
        assert!(!uuids.contains(&admin.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ana@example.com").await;

        ctx.users.delete_user(user.uuid).await?;

        let result = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let again = ctx.users.delete_user(user.uuid).await;

        assert!(matches!(again, Err(UsersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_buyer_returns_cart_units_to_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;
        let buyer = ctx.create_user("bob@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let post = ctx.create_post(owner.uuid, "la-tienda", Some(5)).await;

        ctx.shopping
            .add_post(
                buyer.uuid,
                AddToShopping {
                    route_name: "la-tienda".to_string(),
                    post: post.uuid,
                    amount_to_add: 3,
                },
            )
            .await?;

        ctx.users.delete_user(buyer.uuid).await?;

        let restored = ctx
            .posts
            .get_post(post.uuid, PostScope::Owner(owner.uuid))
            .await?;

        assert_eq!(restored.amount_available, Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn deleting_an_owner_removes_businesses_posts_and_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;
        let buyer = ctx.create_user("bob@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let post = ctx.create_post(owner.uuid, "la-tienda", Some(5)).await;

        ctx.shopping
            .add_post(
                buyer.uuid,
                AddToShopping {
                    route_name: "la-tienda".to_string(),
                    post: post.uuid,
                    amount_to_add: 1,
                },
            )
            .await?;

        ctx.users.delete_user(owner.uuid).await?;

        let business = ctx
            .businesses
            .get_business("la-tienda", BusinessScope::Public)
            .await;

        assert!(
            matches!(business, Err(BusinessesServiceError::NotFound)),
            "expected the business to be gone, got {business:?}"
        );

        let post = ctx.posts.get_post(post.uuid, PostScope::Public).await;

        assert!(
            matches!(post, Err(PostsServiceError::NotFound)),
            "expected the post to be gone, got {post:?}"
        );
        assert!(
            ctx.shopping
                .list_shopping(buyer.uuid, "la-tienda")
                .await?
                .is_empty()
        );

        Ok(())
    }
}
