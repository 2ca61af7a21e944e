//! Shopping service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};

use crate::{
    database::{Db, amount_to_db},
    domain::{
        businesses::PgBusinessesRepository,
        posts::{PgPostsRepository, models::PostUuid},
        shopping::{
            data::{AddToShopping, ShoppingAdded},
            errors::ShoppingServiceError,
            models::{PostSnapshot, Shopping, ShoppingPost, ShoppingState, ShoppingUuid},
            repositories::{PgShoppingLinesRepository, PgShoppingRepository},
            stock,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgShoppingService {
    db: Db,
    shopping: PgShoppingRepository,
    lines: PgShoppingLinesRepository,
    posts: PgPostsRepository,
    businesses: PgBusinessesRepository,
}

impl PgShoppingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            shopping: PgShoppingRepository::new(),
            lines: PgShoppingLinesRepository::new(),
            posts: PgPostsRepository::new(),
            businesses: PgBusinessesRepository::new(),
        }
    }

    /// Fills in the lines of each cart.
    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut carts: Vec<Shopping>,
    ) -> Result<Vec<Shopping>, ShoppingServiceError> {
        if carts.is_empty() {
            return Ok(carts);
        }

        let uuids: Vec<ShoppingUuid> = carts.iter().map(|cart| cart.uuid).collect();

        let mut lines: FxHashMap<ShoppingUuid, Vec<ShoppingPost>> = FxHashMap::default();

        for line in self.lines.list_lines(tx, &uuids).await? {
            lines.entry(line.shopping_uuid).or_default().push(line.line);
        }

        for cart in &mut carts {
            cart.posts = lines.remove(&cart.uuid).unwrap_or_default();
        }

        Ok(carts)
    }

    async fn with_lines_one(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: Shopping,
    ) -> Result<Shopping, ShoppingServiceError> {
        self.with_lines(tx, vec![cart])
            .await?
            .pop()
            .ok_or(ShoppingServiceError::NotFound)
    }

    /// Gives `count` units of a post back to its stock.
    async fn restore_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        post: PostUuid,
        count: u64,
    ) -> Result<(), ShoppingServiceError> {
        self.posts
            .adjust_stock(tx, post, amount_to_db("amount_available", count)?)
            .await?;

        Ok(())
    }
}

/// Rejects amounts a cart line cannot hold.
fn ensure_amount(amount_to_add: u64) -> Result<(), ShoppingServiceError> {
    if amount_to_add == 0 || i64::try_from(amount_to_add).is_err() {
        return Err(ShoppingServiceError::InvalidAmount);
    }

    Ok(())
}

/// Units that can be taken from a stock for a request of `requested`.
fn available_units(
    requested: u64,
    amount_available: Option<u64>,
) -> Result<u64, ShoppingServiceError> {
    match amount_available {
        None => Ok(requested),
        Some(0) => Err(ShoppingServiceError::OutOfStock),
        Some(available) => Ok(requested.min(available)),
    }
}

#[async_trait]
impl ShoppingService for PgShoppingService {
    async fn add_post(
        &self,
        purchaser: UserUuid,
        request: AddToShopping,
    ) -> Result<ShoppingAdded, ShoppingServiceError> {
        ensure_amount(request.amount_to_add)?;

        let mut tx = self.db.begin().await?;

        // Checked before the cart exists so an unknown business is a missing post.
        match self
            .posts
            .get_post(&mut tx, request.post, None, Some(false))
            .await
        {
            Ok(post) if post.route_name == request.route_name => {}
            Ok(_) | Err(sqlx::Error::RowNotFound) => {
                return Err(ShoppingServiceError::PostNotFound);
            }
            Err(error) => return Err(error.into()),
        }

        let cart = self
            .shopping
            .upsert_construction(&mut tx, purchaser, &request.route_name)
            .await?;

        let post = self
            .posts
            .lock_post(&mut tx, request.post)
            .await?
            .filter(|post| {
                post.route_name == request.route_name && !post.hidden && !post.hidden_business
            })
            .ok_or(ShoppingServiceError::PostNotFound)?;

        let added = available_units(request.amount_to_add, post.amount_available)?;

        if post.amount_available.is_some() {
            self.posts
                .adjust_stock(&mut tx, post.uuid, -amount_to_db("amount_available", added)?)
                .await?;
        }

        self.lines
            .add_line(&mut tx, cart.uuid, PostSnapshot::from(&post), added)
            .await?;

        let shopping = self.with_lines_one(&mut tx, cart).await?;

        tx.commit().await?;

        if added < request.amount_to_add {
            tracing::warn!(
                post = %post.uuid,
                requested = request.amount_to_add,
                added,
                "stock shortfall while adding to shopping"
            );
        }

        Ok(ShoppingAdded {
            shopping,
            requested: request.amount_to_add,
            added,
        })
    }

    async fn list_shopping(
        &self,
        purchaser: UserUuid,
        route_name: &str,
    ) -> Result<Vec<Shopping>, ShoppingServiceError> {
        let mut tx = self.db.begin().await?;

        let carts = self
            .shopping
            .list_shopping(&mut tx, route_name, Some(purchaser), None)
            .await?;

        let carts = self.with_lines(&mut tx, carts).await?;

        tx.commit().await?;

        Ok(carts)
    }

    async fn get_shopping(
        &self,
        purchaser: UserUuid,
        shopping: ShoppingUuid,
    ) -> Result<Shopping, ShoppingServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.shopping.get_shopping(&mut tx, shopping, purchaser).await?;
        let cart = self.with_lines_one(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn make_order(
        &self,
        purchaser: UserUuid,
        shopping: ShoppingUuid,
    ) -> Result<Shopping, ShoppingServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .shopping
            .transition(
                &mut tx,
                shopping,
                purchaser,
                ShoppingState::Construction,
                ShoppingState::Requested,
            )
            .await?
            .ok_or(ShoppingServiceError::NotFound)?;

        let cart = self.with_lines_one(&mut tx, cart).await?;

        tx.commit().await?;

        tracing::info!(
            shopping = %cart.uuid,
            route_name = %cart.route_name,
            "order requested"
        );

        Ok(cart)
    }

    async fn remove_post(
        &self,
        purchaser: UserUuid,
        route_name: &str,
        post: PostUuid,
    ) -> Result<(), ShoppingServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self
            .shopping
            .find_construction(&mut tx, purchaser, route_name)
            .await?
        else {
            return Ok(());
        };

        let Some(count) = self.lines.remove_line(&mut tx, cart.uuid, post).await? else {
            return Ok(());
        };

        self.restore_stock(&mut tx, post, count).await?;

        if self.lines.count_lines(&mut tx, cart.uuid).await? == 0 {
            self.shopping.delete_shopping(&mut tx, cart.uuid).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, purchaser: UserUuid, route_name: &str) -> Result<(), ShoppingServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self
            .shopping
            .find_construction(&mut tx, purchaser, route_name)
            .await?
        else {
            return Ok(());
        };

        let lines = self.lines.list_lines(&mut tx, &[cart.uuid]).await?;

        stock::restore_lines(&mut tx, &lines).await?;

        self.shopping.delete_shopping(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_for_business(
        &self,
        owner: UserUuid,
        route_name: &str,
        state: Option<ShoppingState>,
    ) -> Result<Vec<Shopping>, ShoppingServiceError> {
        let mut tx = self.db.begin().await?;

        self.businesses
            .get_business(&mut tx, route_name, Some(owner), None)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => ShoppingServiceError::BusinessNotFound,
                error => ShoppingServiceError::from(error),
            })?;

        let carts = self
            .shopping
            .list_shopping(&mut tx, route_name, None, state)
            .await?;

        let carts = self.with_lines(&mut tx, carts).await?;

        tx.commit().await?;

        Ok(carts)
    }
}

#[automock]
#[async_trait]
pub trait ShoppingService: Send + Sync {
    /// Adds units of a post to the purchaser's cart under construction, taking them from stock.
    ///
    /// Only the available units are added when the stock is short.
    async fn add_post(
        &self,
        purchaser: UserUuid,
        request: AddToShopping,
    ) -> Result<ShoppingAdded, ShoppingServiceError>;

    /// The purchaser's carts for a business, newest first.
    async fn list_shopping(
        &self,
        purchaser: UserUuid,
        route_name: &str,
    ) -> Result<Vec<Shopping>, ShoppingServiceError>;

    /// Retrieve one of the purchaser's carts.
    async fn get_shopping(
        &self,
        purchaser: UserUuid,
        shopping: ShoppingUuid,
    ) -> Result<Shopping, ShoppingServiceError>;

    /// Turns a cart under construction into a requested order.
    async fn make_order(
        &self,
        purchaser: UserUuid,
        shopping: ShoppingUuid,
    ) -> Result<Shopping, ShoppingServiceError>;

    /// Takes a post out of the cart under construction and returns its units to stock.
    async fn remove_post(
        &self,
        purchaser: UserUuid,
        route_name: &str,
        post: PostUuid,
    ) -> Result<(), ShoppingServiceError>;

    /// Drops the cart under construction and returns all of its units to stock.
    async fn clear(&self, purchaser: UserUuid, route_name: &str)
    -> Result<(), ShoppingServiceError>;

    /// Carts placed in an owned business.
    async fn list_for_business(
        &self,
        owner: UserUuid,
        route_name: &str,
        state: Option<ShoppingState>,
    ) -> Result<Vec<Shopping>, ShoppingServiceError>;
}
