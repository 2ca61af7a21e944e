//! Shopping Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;

use crate::{
    database::{amount_to_db, count_from_db, try_get_amount},
    domain::{
        posts::models::PostUuid,
        shopping::models::{PostSnapshot, ShoppingPost, ShoppingUuid},
    },
};

const LIST_SHOPPING_POSTS_SQL: &str = include_str!("../sql/list_shopping_posts.sql");
const UPSERT_SHOPPING_POST_SQL: &str = include_str!("../sql/upsert_shopping_post.sql");
const REMOVE_SHOPPING_POST_SQL: &str = include_str!("../sql/remove_shopping_post.sql");
const COUNT_SHOPPING_POSTS_SQL: &str = include_str!("../sql/count_shopping_posts.sql");

/// A cart line together with the cart it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct ShoppingLine {
    pub shopping_uuid: ShoppingUuid,
    pub line: ShoppingPost,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgShoppingLinesRepository;

impl PgShoppingLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shopping: &[ShoppingUuid],
    ) -> Result<Vec<ShoppingLine>, sqlx::Error> {
        let uuids: Vec<Uuid> = shopping.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, ShoppingLine>(LIST_SHOPPING_POSTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Inserts a line or adds `count` to the existing one, refreshing its snapshot.
    pub(crate) async fn add_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shopping: ShoppingUuid,
        post: PostSnapshot,
        count: u64,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_SHOPPING_POST_SQL)
            .bind(shopping.into_uuid())
            .bind(post.uuid.into_uuid())
            .bind(Json(post))
            .bind(amount_to_db("count", count)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Deletes a line, returning the count it held.
    pub(crate) async fn remove_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shopping: ShoppingUuid,
        post: PostUuid,
    ) -> Result<Option<u64>, sqlx::Error> {
        let count: Option<i64> = query_scalar(REMOVE_SHOPPING_POST_SQL)
            .bind(shopping.into_uuid())
            .bind(post.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        count.map(count_from_db).transpose()
    }

    pub(crate) async fn count_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shopping: ShoppingUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_SHOPPING_POSTS_SQL)
            .bind(shopping.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        count_from_db(count)
    }
}

impl<'r> FromRow<'r, PgRow> for ShoppingLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            shopping_uuid: ShoppingUuid::from_uuid(row.try_get("shopping_uuid")?),
            line: ShoppingPost {
                post: row.try_get::<Json<PostSnapshot>, _>("post")?.0,
                count: try_get_amount(row, "count")?,
                last_updated_date: row
                    .try_get::<SqlxTimestamp, _>("last_updated_at")?
                    .to_jiff(),
            },
        })
    }
}
