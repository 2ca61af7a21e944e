//! Businesses service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        businesses::{
            data::{BusinessFilter, BusinessScope, BusinessUpdate, NewBusiness},
            errors::BusinessesServiceError,
            models::{Business, is_valid_route_name},
            repository::PgBusinessesRepository,
        },
        plans::{PgPlansRepository, models::PaymentPlan},
        users::{PgUsersRepository, models::UserUuid},
    },
    pagination::{PageRequest, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgBusinessesService {
    db: Db,
    repository: PgBusinessesRepository,
    users: PgUsersRepository,
    plans: PgPlansRepository,
}

impl PgBusinessesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBusinessesRepository::new(),
            users: PgUsersRepository::new(),
            plans: PgPlansRepository::new(),
        }
    }
}

fn ensure_route_name(route_name: &str) -> Result<(), BusinessesServiceError> {
    if is_valid_route_name(route_name) {
        Ok(())
    } else {
        Err(BusinessesServiceError::InvalidRouteName)
    }
}

#[async_trait]
impl BusinessesService for PgBusinessesService {
    async fn list_businesses(
        &self,
        filter: BusinessFilter,
        page: PageRequest,
    ) -> Result<Paginated<Business>, BusinessesServiceError> {
        let mut tx = self.db.begin().await?;

        let businesses = self
            .repository
            .list_businesses(&mut tx, &filter, page)
            .await?;

        let count = self.repository.count_businesses(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(Paginated::new(businesses, count, page))
    }

    async fn route_names(&self, owner: UserUuid) -> Result<Vec<String>, BusinessesServiceError> {
        let mut tx = self.db.begin().await?;

        let route_names = self.repository.route_names(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(route_names)
    }

    async fn get_business(
        &self,
        route_name: &str,
        scope: BusinessScope,
    ) -> Result<Business, BusinessesServiceError> {
        let (owner, hidden) = match scope {
            BusinessScope::Public => (None, Some(false)),
            BusinessScope::Owner(owner) => (Some(owner), None),
        };

        let mut tx = self.db.begin().await?;

        let business = self
            .repository
            .get_business(&mut tx, route_name, owner, hidden)
            .await?;

        tx.commit().await?;

        Ok(business)
    }

    async fn create_business(
        &self,
        owner: UserUuid,
        business: NewBusiness,
    ) -> Result<Business, BusinessesServiceError> {
        if business.name.trim().is_empty() {
            return Err(BusinessesServiceError::MissingRequiredData);
        }

        ensure_route_name(&business.route_name)?;

        let mut tx = self.db.begin().await?;

        // Serializes concurrent creations by the same user around the plan check.
        let user = self.users.lock_user(&mut tx, owner).await?;

        if !user.can_create_business {
            return Err(BusinessesServiceError::NotAllowed);
        }

        let plan = PaymentPlan::of(self.plans.current_plan_type(&mut tx, owner).await?);
        let owned = self.repository.count_owned(&mut tx, owner).await?;

        plan.ensure_business_slot(owned)?;

        let created = self
            .repository
            .create_business(&mut tx, owner, business)
            .await?;

        tx.commit().await?;

        tracing::info!(
            owner = %owner,
            route_name = %created.route_name,
            "business created"
        );

        Ok(created)
    }

    async fn update_business(
        &self,
        owner: UserUuid,
        route_name: &str,
        update: BusinessUpdate,
    ) -> Result<Business, BusinessesServiceError> {
        if let Some(name) = &update.name
            && name.trim().is_empty()
        {
            return Err(BusinessesServiceError::MissingRequiredData);
        }

        if let Some(new_route_name) = &update.route_name {
            ensure_route_name(new_route_name)?;
        }

        let mut tx = self.db.begin().await?;

        if let Some(banner_images) = &update.banner_images {
            let plan = PaymentPlan::of(self.plans.current_plan_type(&mut tx, owner).await?);

            plan.ensure_banner_images(banner_images.len())?;
        }

        let hidden = update.hidden;

        let updated = self
            .repository
            .update_business(&mut tx, owner, route_name, update)
            .await?;

        if let Some(hidden) = hidden {
            self.repository
                .set_posts_hidden_business(&mut tx, &updated.route_name, hidden)
                .await?;
        }

        if updated.route_name != route_name {
            self.repository
                .rename_shopping_snapshots(&mut tx, route_name, &updated.route_name)
                .await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_business(
        &self,
        owner: UserUuid,
        route_name: &str,
    ) -> Result<(), BusinessesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_business(&mut tx, owner, route_name)
            .await?;

        if rows_affected == 0 {
            return Err(BusinessesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BusinessesService: Send + Sync {
    /// Lists businesses matching `filter`, newest first.
    async fn list_businesses(
        &self,
        filter: BusinessFilter,
        page: PageRequest,
    ) -> Result<Paginated<Business>, BusinessesServiceError>;

    /// Route names of every business the user owns.
    async fn route_names(&self, owner: UserUuid) -> Result<Vec<String>, BusinessesServiceError>;

    /// Retrieve a single business by route name.
    async fn get_business(
        &self,
        route_name: &str,
        scope: BusinessScope,
    ) -> Result<Business, BusinessesServiceError>;

    /// Creates a business, subject to the owner's permission and plan.
    async fn create_business(
        &self,
        owner: UserUuid,
        business: NewBusiness,
    ) -> Result<Business, BusinessesServiceError>;

    /// Updates an owned business. Visibility changes are mirrored onto its posts.
    async fn update_business(
        &self,
        owner: UserUuid,
        route_name: &str,
        update: BusinessUpdate,
    ) -> Result<Business, BusinessesServiceError>;

    /// Deletes an owned business with its posts and carts.
    async fn delete_business(
        &self,
        owner: UserUuid,
        route_name: &str,
    ) -> Result<(), BusinessesServiceError>;
}
