//! Businesses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};

use crate::{
    database::{amount_to_db, contains_pattern, count_from_db, try_get_enum},
    domain::{
        businesses::{
            data::{BusinessFilter, BusinessUpdate, NewBusiness},
            models::{AboutUsPage, Business, BusinessUuid, PostCategory, SocialLinks},
        },
        images::Image,
        users::models::UserUuid,
    },
    pagination::PageRequest,
};

const LIST_BUSINESSES_SQL: &str = include_str!("sql/list_businesses.sql");
const COUNT_BUSINESSES_SQL: &str = include_str!("sql/count_businesses.sql");
const LIST_ROUTE_NAMES_SQL: &str = include_str!("sql/list_route_names.sql");
const GET_BUSINESS_SQL: &str = include_str!("sql/get_business.sql");
const LOCK_BUSINESS_SQL: &str = include_str!("sql/lock_business.sql");
const COUNT_OWNED_BUSINESSES_SQL: &str = include_str!("sql/count_owned_businesses.sql");
const CREATE_BUSINESS_SQL: &str = include_str!("sql/create_business.sql");
const UPDATE_BUSINESS_SQL: &str = include_str!("sql/update_business.sql");
const SET_POSTS_HIDDEN_BUSINESS_SQL: &str = include_str!("sql/set_posts_hidden_business.sql");
const RENAME_SHOPPING_SNAPSHOTS_SQL: &str = include_str!("sql/rename_shopping_snapshots.sql");
const DELETE_BUSINESS_SQL: &str = include_str!("sql/delete_business.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBusinessesRepository;

impl PgBusinessesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_businesses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &BusinessFilter,
        page: PageRequest,
    ) -> Result<Vec<Business>, sqlx::Error> {
        query_as::<Postgres, Business>(LIST_BUSINESSES_SQL)
            .bind(filter.created_by.map(UserUuid::into_uuid))
            .bind(filter.route_name.as_deref())
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.hidden)
            .bind(i64::from(page.limit()))
            .bind(amount_to_db("offset", page.offset())?)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_businesses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &BusinessFilter,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_BUSINESSES_SQL)
            .bind(filter.created_by.map(UserUuid::into_uuid))
            .bind(filter.route_name.as_deref())
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.hidden)
            .fetch_one(&mut **tx)
            .await?;

        count_from_db(count)
    }

    pub(crate) async fn route_names(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar(LIST_ROUTE_NAMES_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route_name: &str,
        owner: Option<UserUuid>,
        hidden: Option<bool>,
    ) -> Result<Business, sqlx::Error> {
        query_as::<Postgres, Business>(GET_BUSINESS_SQL)
            .bind(route_name)
            .bind(owner.map(UserUuid::into_uuid))
            .bind(hidden)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetches an owned business and locks it until the transaction ends.
    pub(crate) async fn lock_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route_name: &str,
        owner: UserUuid,
    ) -> Result<Option<Business>, sqlx::Error> {
        query_as::<Postgres, Business>(LOCK_BUSINESS_SQL)
            .bind(route_name)
            .bind(owner.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn count_owned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_OWNED_BUSINESSES_SQL)
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        count_from_db(count)
    }

    pub(crate) async fn create_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        business: NewBusiness,
    ) -> Result<Business, sqlx::Error> {
        query_as::<Postgres, Business>(CREATE_BUSINESS_SQL)
            .bind(BusinessUuid::new().into_uuid())
            .bind(business.name)
            .bind(business.route_name)
            .bind(business.category.as_str())
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        route_name: &str,
        update: BusinessUpdate,
    ) -> Result<Business, sqlx::Error> {
        query_as::<Postgres, Business>(UPDATE_BUSINESS_SQL)
            .bind(route_name)
            .bind(owner.into_uuid())
            .bind(update.hidden)
            .bind(update.social_links.map(Json))
            .bind(update.banner_images.map(Json))
            .bind(update.name)
            .bind(update.route_name)
            .bind(update.logo.map(Json))
            .bind(update.layouts.map(Json))
            .bind(update.post_categories.map(Json))
            .bind(update.about_us_page.map(Json))
            .bind(update.whatsapp_phone_number)
            .fetch_one(&mut **tx)
            .await
    }

    /// Mirrors a business' visibility onto its posts.
    pub(crate) async fn set_posts_hidden_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route_name: &str,
        hidden: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_POSTS_HIDDEN_BUSINESS_SQL)
            .bind(route_name)
            .bind(hidden)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Points the post snapshots held in carts at the business's new route name.
    pub(crate) async fn rename_shopping_snapshots(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from: &str,
        to: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RENAME_SHOPPING_SNAPSHOTS_SQL)
            .bind(from)
            .bind(to)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        route_name: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BUSINESS_SQL)
            .bind(route_name)
            .bind(owner.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Business {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BusinessUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            route_name: row.try_get("route_name")?,
            category: try_get_enum(row, "category")?,
            created_by: UserUuid::from_uuid(row.try_get("created_by")?),
            hidden: row.try_get("hidden")?,
            banner_images: row.try_get::<Json<Vec<Image>>, _>("banner_images")?.0,
            logo: row
                .try_get::<Option<Json<Image>>, _>("logo")?
                .map(|logo| logo.0),
            post_categories: row
                .try_get::<Json<Vec<PostCategory>>, _>("post_categories")?
                .0,
            social_links: row.try_get::<Json<SocialLinks>, _>("social_links")?.0,
            layouts: row.try_get::<Json<Value>, _>("layouts")?.0,
            about_us_page: row
                .try_get::<Option<Json<AboutUsPage>>, _>("about_us_page")?
                .map(|page| page.0),
            whatsapp_phone_number: row.try_get("whatsapp_phone_number")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
