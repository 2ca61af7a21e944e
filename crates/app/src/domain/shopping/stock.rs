//! Returning cart units to stock.
//!
//! Every transaction that touches carts and stock locks the carts first and the posts
//! after them, in uuid order.

use std::collections::BTreeMap;

use sqlx::{Postgres, Transaction};

use crate::{
    database::amount_to_db,
    domain::{
        posts::{PgPostsRepository, models::PostUuid},
        shopping::repositories::{PgShoppingLinesRepository, PgShoppingRepository, ShoppingLine},
        users::models::UserUuid,
    },
};

/// Gives the units held by `lines` back to their posts.
pub(crate) async fn restore_lines(
    tx: &mut Transaction<'_, Postgres>,
    lines: &[ShoppingLine],
) -> Result<(), sqlx::Error> {
    let mut held: BTreeMap<PostUuid, u64> = BTreeMap::new();

    for line in lines {
        let count = held.entry(line.line.post.uuid).or_default();
        *count = count.saturating_add(line.line.count);
    }

    let posts = PgPostsRepository::new();

    for (post, count) in held {
        posts
            .adjust_stock(tx, post, amount_to_db("amount_available", count)?)
            .await?;
    }

    Ok(())
}

/// Locks every cart the purchaser is still building and returns their units to stock.
///
/// The carts themselves are left for the caller to delete.
pub(crate) async fn release_purchaser_carts(
    tx: &mut Transaction<'_, Postgres>,
    purchaser: UserUuid,
) -> Result<(), sqlx::Error> {
    let carts = PgShoppingRepository::new()
        .lock_constructions(tx, purchaser)
        .await?;

    if carts.is_empty() {
        return Ok(());
    }

    let lines = PgShoppingLinesRepository::new()
        .list_lines(tx, &carts)
        .await?;

    restore_lines(tx, &lines).await
}
