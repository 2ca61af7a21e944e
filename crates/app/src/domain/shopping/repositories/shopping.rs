//! Shopping Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};
use uuid::Uuid;

use crate::{
    database::try_get_enum,
    domain::{
        shopping::models::{Shopping, ShoppingState, ShoppingUuid},
        users::models::UserUuid,
    },
};

const UPSERT_CONSTRUCTION_SQL: &str = include_str!("../sql/upsert_construction.sql");
const FIND_CONSTRUCTION_SQL: &str = include_str!("../sql/find_construction.sql");
const LOCK_PURCHASER_CONSTRUCTION_SQL: &str =
    include_str!("../sql/lock_purchaser_construction.sql");
const LIST_SHOPPING_SQL: &str = include_str!("../sql/list_shopping.sql");
const GET_SHOPPING_SQL: &str = include_str!("../sql/get_shopping.sql");
const SET_SHOPPING_STATE_SQL: &str = include_str!("../sql/set_shopping_state.sql");
const DELETE_SHOPPING_SQL: &str = include_str!("../sql/delete_shopping.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgShoppingRepository;

impl PgShoppingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Returns the purchaser's cart under construction for a business, creating it if needed.
    pub(crate) async fn upsert_construction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchaser: UserUuid,
        route_name: &str,
    ) -> Result<Shopping, sqlx::Error> {
        query_as::<Postgres, Shopping>(UPSERT_CONSTRUCTION_SQL)
            .bind(ShoppingUuid::new().into_uuid())
            .bind(purchaser.into_uuid())
            .bind(route_name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Locks the purchaser's cart under construction for a business, if any.
    pub(crate) async fn find_construction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchaser: UserUuid,
        route_name: &str,
    ) -> Result<Option<Shopping>, sqlx::Error> {
        query_as::<Postgres, Shopping>(FIND_CONSTRUCTION_SQL)
            .bind(purchaser.into_uuid())
            .bind(route_name)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Locks all carts the purchaser is still building, in uuid order.
    pub(crate) async fn lock_constructions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchaser: UserUuid,
    ) -> Result<Vec<ShoppingUuid>, sqlx::Error> {
        let uuids: Vec<Uuid> = query_scalar(LOCK_PURCHASER_CONSTRUCTION_SQL)
            .bind(purchaser.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(uuids.into_iter().map(ShoppingUuid::from_uuid).collect())
    }

    pub(crate) async fn list_shopping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route_name: &str,
        purchaser: Option<UserUuid>,
        state: Option<ShoppingState>,
    ) -> Result<Vec<Shopping>, sqlx::Error> {
        query_as::<Postgres, Shopping>(LIST_SHOPPING_SQL)
            .bind(route_name)
            .bind(purchaser.map(UserUuid::into_uuid))
            .bind(state.map(ShoppingState::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_shopping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shopping: ShoppingUuid,
        purchaser: UserUuid,
    ) -> Result<Shopping, sqlx::Error> {
        query_as::<Postgres, Shopping>(GET_SHOPPING_SQL)
            .bind(shopping.into_uuid())
            .bind(purchaser.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Moves a cart from `from` to `to`; `None` when it is not in `from`.
    pub(crate) async fn transition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shopping: ShoppingUuid,
        purchaser: UserUuid,
        from: ShoppingState,
        to: ShoppingState,
    ) -> Result<Option<Shopping>, sqlx::Error> {
        query_as::<Postgres, Shopping>(SET_SHOPPING_STATE_SQL)
            .bind(shopping.into_uuid())
            .bind(purchaser.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_shopping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shopping: ShoppingUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SHOPPING_SQL)
            .bind(shopping.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Shopping {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ShoppingUuid::from_uuid(row.try_get("uuid")?),
            purchaser_uuid: UserUuid::from_uuid(row.try_get("purchaser_uuid")?),
            route_name: row.try_get("route_name")?,
            state: try_get_enum(row, "state")?,
            posts: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
