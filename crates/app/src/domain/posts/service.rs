//! Posts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        businesses::PgBusinessesRepository,
        plans::{PgPlansRepository, models::PaymentPlan},
        posts::{
            data::{NewPost, PostFilter, PostScope, PostUpdate},
            errors::PostsServiceError,
            models::{Post, PostUuid},
            repository::PgPostsRepository,
        },
        users::models::UserUuid,
    },
    pagination::{PageRequest, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgPostsService {
    db: Db,
    repository: PgPostsRepository,
    businesses: PgBusinessesRepository,
    plans: PgPlansRepository,
}

impl PgPostsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPostsRepository::new(),
            businesses: PgBusinessesRepository::new(),
            plans: PgPlansRepository::new(),
        }
    }

    /// Creates a post in an owned business once the owner's plan allows it.
    async fn insert_post(
        &self,
        owner: UserUuid,
        post: NewPost,
    ) -> Result<Post, PostsServiceError> {
        let mut tx = self.db.begin().await?;

        // Locking the business serializes concurrent creations around the post count.
        let business = self
            .businesses
            .lock_business(&mut tx, &post.route_name, owner)
            .await?
            .ok_or(PostsServiceError::BusinessNotFound)?;

        let plan = PaymentPlan::of(self.plans.current_plan_type(&mut tx, owner).await?);
        let existing = self
            .repository
            .count_business_posts(&mut tx, &business.route_name)
            .await?;

        plan.ensure_post_slot(existing)?;
        plan.ensure_post_images(post.images.len())?;

        let created = self
            .repository
            .create_post(&mut tx, owner, business.hidden, post)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl PostsService for PgPostsService {
    async fn list_posts(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostsServiceError> {
        let mut tx = self.db.begin().await?;

        let posts = self.repository.list_posts(&mut tx, &filter, page).await?;
        let count = self.repository.count_posts(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(Paginated::new(posts, count, page))
    }

    async fn get_post(&self, post: PostUuid, scope: PostScope) -> Result<Post, PostsServiceError> {
        let (owner, hidden) = match scope {
            PostScope::Public => (None, Some(false)),
            PostScope::Owner(owner) => (Some(owner), None),
        };

        let mut tx = self.db.begin().await?;

        let post = self
            .repository
            .get_post(&mut tx, post, owner, hidden)
            .await?;

        tx.commit().await?;

        Ok(post)
    }

    async fn create_post(&self, owner: UserUuid, post: NewPost) -> Result<Post, PostsServiceError> {
        if post.name.trim().is_empty()
            || post.description.trim().is_empty()
            || post.route_name.is_empty()
        {
            return Err(PostsServiceError::MissingRequiredData);
        }

        let created = self.insert_post(owner, post).await?;

        tracing::info!(
            owner = %owner,
            post = %created.uuid,
            route_name = %created.route_name,
            "post created"
        );

        Ok(created)
    }

    async fn update_post(
        &self,
        owner: UserUuid,
        post: PostUuid,
        update: PostUpdate,
    ) -> Result<Post, PostsServiceError> {
        let blank = |value: &Option<String>| value.as_deref().is_some_and(|v| v.trim().is_empty());

        if blank(&update.name) || blank(&update.description) {
            return Err(PostsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        if let Some(images) = &update.images {
            let plan = PaymentPlan::of(self.plans.current_plan_type(&mut tx, owner).await?);

            plan.ensure_post_images(images.len())?;
        }

        let updated = self
            .repository
            .update_post(&mut tx, owner, post, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_post(&self, owner: UserUuid, post: PostUuid) -> Result<(), PostsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_post(&mut tx, owner, post).await?;

        if rows_affected == 0 {
            return Err(PostsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn duplicate_post(
        &self,
        owner: UserUuid,
        post: PostUuid,
    ) -> Result<Post, PostsServiceError> {
        let original = {
            let mut tx = self.db.begin().await?;

            let original = self
                .repository
                .get_post(&mut tx, post, Some(owner), None)
                .await?;

            tx.commit().await?;

            original
        };

        self.insert_post(
            owner,
            NewPost {
                route_name: original.route_name,
                name: original.name,
                description: original.description,
                details: original.details,
                price: original.price,
                discount: original.discount,
                currency: original.currency,
                amount_available: original.amount_available,
                colors: original.colors,
                highlights: original.highlights,
                hidden: original.hidden,
                post_categories_tags: original.post_categories_tags,
                clothing_sizes: original.clothing_sizes,
                images: Vec::new(),
                post_page_layout: original.post_page_layout,
            },
        )
        .await
    }
}

#[automock]
#[async_trait]
pub trait PostsService: Send + Sync {
    /// Lists posts matching `filter`, newest first.
    async fn list_posts(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostsServiceError>;

    /// Retrieve a single post.
    async fn get_post(&self, post: PostUuid, scope: PostScope) -> Result<Post, PostsServiceError>;

    /// Creates a post in one of the owner's businesses.
    async fn create_post(&self, owner: UserUuid, post: NewPost) -> Result<Post, PostsServiceError>;

    /// Updates an owned post.
    async fn update_post(
        &self,
        owner: UserUuid,
        post: PostUuid,
        update: PostUpdate,
    ) -> Result<Post, PostsServiceError>;

    /// Deletes an owned post.
    async fn delete_post(&self, owner: UserUuid, post: PostUuid) -> Result<(), PostsServiceError>;

    /// Copies an owned post without its reviews and images.
    async fn duplicate_post(
        &self,
        owner: UserUuid,
        post: PostUuid,
    ) -> Result<Post, PostsServiceError>;
}

#[cfg(test)]
mod tests {
    use smallvec::{SmallVec, smallvec};
    use testresult::TestResult;

    use crate::{
        domain::{
            businesses::{BusinessesService, data::BusinessUpdate},
            images::Image,
            plans::models::{PlanLimit, PlanType},
            posts::{
                data::TagMatch,
                models::{PostClothingSize, PostColor, PostCurrency},
            },
        },
        test::TestContext,
    };

    use super::*;

    fn new_post(route_name: &str, name: &str) -> NewPost {
        NewPost {
            route_name: route_name.to_string(),
            name: name.to_string(),
            description: "Algodón 100%".to_string(),
            ..NewPost::default()
        }
    }

    fn image(n: u32) -> Image {
        Image {
            src: format!("https://cdn.example.com/{n}.png"),
            width: 400,
            height: 400,
            href: Some("https://example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn create_post_stores_all_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let post = ctx
            .posts
            .create_post(
                owner.uuid,
                NewPost {
                    price: Some(2_500),
                    discount: Some(10),
                    currency: Some(PostCurrency::Usd),
                    amount_available: Some(4),
                    colors: vec![PostColor::Black, PostColor::White],
                    clothing_sizes: vec![PostClothingSize::M, PostClothingSize::Xxl],
                    post_categories_tags: vec!["camisas".to_string()],
                    images: vec![image(1)],
                    ..new_post("la-tienda", "Camisa")
                },
            )
            .await?;

        let stored = ctx
            .posts
            .get_post(post.uuid, PostScope::Owner(owner.uuid))
            .await?;

        assert_eq!(stored, post);
        assert_eq!(stored.price, Some(2_500));
        assert_eq!(stored.currency, Some(PostCurrency::Usd));
        assert_eq!(stored.clothing_sizes, vec![PostClothingSize::M, PostClothingSize::Xxl]);
        assert_eq!(stored.reviews, [0; 5]);
        assert!(!stored.hidden_business);

        Ok(())
    }

    #[tokio::test]
    async fn create_post_in_foreign_business_returns_business_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;
        let other = ctx.create_user("bob@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let result = ctx
            .posts
            .create_post(other.uuid, new_post("la-tienda", "Camisa"))
            .await;

        assert!(
            matches!(result, Err(PostsServiceError::BusinessNotFound)),
            "expected BusinessNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_post_requires_name_and_description() {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let result = ctx
            .posts
            .create_post(
                owner.uuid,
                NewPost {
                    description: " ".to_string(),
                    ..new_post("la-tienda", "Camisa")
                },
            )
            .await;

        assert!(
            matches!(result, Err(PostsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn post_in_hidden_business_inherits_visibility() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        ctx.businesses
            .update_business(
                owner.uuid,
                "la-tienda",
                BusinessUpdate {
                    hidden: Some(true),
                    ..BusinessUpdate::default()
                },
            )
            .await?;

        let post = ctx
            .posts
            .create_post(owner.uuid, new_post("la-tienda", "Camisa"))
            .await?;

        assert!(post.hidden_business);

        let public = ctx.posts.get_post(post.uuid, PostScope::Public).await;

        assert!(
            matches!(public, Err(PostsServiceError::NotFound)),
            "expected NotFound, got {public:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn free_plan_limits_post_images() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let result = ctx
            .posts
            .create_post(
                owner.uuid,
                NewPost {
                    images: vec![image(1), image(2)],
                    ..new_post("la-tienda", "Camisa")
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(PostsServiceError::PlanLimitExceeded(PlanLimit::PostImages { max: 1 }))
            ),
            "expected PlanLimitExceeded, got {result:?}"
        );

        ctx.grant_plan(owner.uuid, PlanType::Beginner).await?;

        let post = ctx
            .posts
            .create_post(
                owner.uuid,
                NewPost {
                    images: vec![image(1), image(2)],
                    ..new_post("la-tienda", "Camisa")
                },
            )
            .await?;

        assert_eq!(post.images.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn free_plan_limits_posts_per_business() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        for n in 0..20 {
            ctx.posts
                .create_post(owner.uuid, new_post("la-tienda", &format!("Post {n}")))
                .await?;
        }

        let result = ctx
            .posts
            .create_post(owner.uuid, new_post("la-tienda", "One too many"))
            .await;

        assert!(
            matches!(
                result,
                Err(PostsServiceError::PlanLimitExceeded(PlanLimit::Posts { max: 20 }))
            ),
            "expected PlanLimitExceeded, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_post_only_touches_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let post = ctx.create_post(owner.uuid, "la-tienda", Some(3)).await;

        let updated = ctx
            .posts
            .update_post(
                owner.uuid,
                post.uuid,
                PostUpdate {
                    price: Some(990),
                    reviews: Some([0, 0, 1, 2, 7]),
                    hidden: Some(true),
                    ..PostUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, post.name);
        assert_eq!(updated.amount_available, Some(3));
        assert_eq!(updated.price, Some(990));
        assert_eq!(updated.reviews, [0, 0, 1, 2, 7]);
        assert!(updated.hidden);

        Ok(())
    }

    #[tokio::test]
    async fn update_post_of_another_user_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;
        let other = ctx.create_user("bob@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let post = ctx.create_post(owner.uuid, "la-tienda", None).await;

        let result = ctx
            .posts
            .update_post(
                other.uuid,
                post.uuid,
                PostUpdate {
                    name: Some("Stolen".to_string()),
                    ..PostUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(PostsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_posts_matches_every_or_some_tags() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        for (name, tags) in [
            ("both", vec!["rojo", "camisa"]),
            ("red", vec!["rojo"]),
            ("none", vec![]),
        ] {
            ctx.posts
                .create_post(
                    owner.uuid,
                    NewPost {
                        post_categories_tags: tags.into_iter().map(str::to_string).collect(),
                        ..new_post("la-tienda", name)
                    },
                )
                .await?;
        }

        let tags: SmallVec<[String; 3]> = smallvec!["rojo".to_string(), "camisa".to_string()];

        let every = ctx
            .posts
            .list_posts(
                PostFilter {
                    post_categories_tags: tags.clone(),
                    ..PostFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        let some = ctx
            .posts
            .list_posts(
                PostFilter {
                    post_categories_tags: tags,
                    post_categories_method: TagMatch::Some,
                    ..PostFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        let names = |page: &Paginated<Post>| {
            let mut names: Vec<String> = page.data.iter().map(|p| p.name.clone()).collect();
            names.sort();
            names
        };

        assert_eq!(names(&every), vec!["both"]);
        assert_eq!(names(&some), vec!["both", "red"]);

        Ok(())
    }

    #[tokio::test]
    async fn public_listing_excludes_hidden_posts() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let visible = ctx.create_post(owner.uuid, "la-tienda", None).await;
        let hidden = ctx.create_post(owner.uuid, "la-tienda", None).await;

        ctx.posts
            .update_post(
                owner.uuid,
                hidden.uuid,
                PostUpdate {
                    hidden: Some(true),
                    ..PostUpdate::default()
                },
            )
            .await?;

        let page = ctx
            .posts
            .list_posts(
                PostFilter {
                    route_names: smallvec!["la-tienda".to_string()],
                    hidden: Some(false),
                    hidden_business: Some(false),
                    ..PostFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        let uuids: Vec<PostUuid> = page.data.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![visible.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_post_drops_reviews_and_images() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let original = ctx
            .posts
            .create_post(
                owner.uuid,
                NewPost {
                    price: Some(100),
                    images: vec![image(1)],
                    ..new_post("la-tienda", "Camisa")
                },
            )
            .await?;

        ctx.posts
            .update_post(
                owner.uuid,
                original.uuid,
                PostUpdate {
                    reviews: Some([1, 1, 1, 1, 1]),
                    ..PostUpdate::default()
                },
            )
            .await?;

        let copy = ctx.posts.duplicate_post(owner.uuid, original.uuid).await?;

        assert_ne!(copy.uuid, original.uuid);
        assert_eq!(copy.name, original.name);
        assert_eq!(copy.price, Some(100));
        assert_eq!(copy.reviews, [0; 5]);
        assert!(copy.images.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn delete_post_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("ana@example.com").await;

        ctx.create_business(owner.uuid, "la-tienda").await;

        let post = ctx.create_post(owner.uuid, "la-tienda", None).await;

        ctx.posts.delete_post(owner.uuid, post.uuid).await?;

        let result = ctx.posts.get_post(post.uuid, PostScope::Public).await;

        assert!(
            matches!(result, Err(PostsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
