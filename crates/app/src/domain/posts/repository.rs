//! Posts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    error::BoxDynError, types::Json,
};

use crate::{
    database::{
        amount_to_db, contains_pattern, count_from_db, try_get_enum_array,
        try_get_optional_amount,
    },
    domain::{
        images::Image,
        posts::{
            data::{NewPost, PostFilter, PostUpdate, TagMatch},
            models::{
                Post, PostClothingSize, PostColor, PostCurrency, PostUuid, REVIEW_BUCKETS,
            },
        },
        users::models::UserUuid,
    },
    pagination::PageRequest,
};

const LIST_POSTS_SQL: &str = include_str!("sql/list_posts.sql");
const COUNT_POSTS_SQL: &str = include_str!("sql/count_posts.sql");
const GET_POST_SQL: &str = include_str!("sql/get_post.sql");
const LOCK_POST_SQL: &str = include_str!("sql/lock_post.sql");
const COUNT_BUSINESS_POSTS_SQL: &str = include_str!("sql/count_business_posts.sql");
const CREATE_POST_SQL: &str = include_str!("sql/create_post.sql");
const UPDATE_POST_SQL: &str = include_str!("sql/update_post.sql");
const ADJUST_STOCK_SQL: &str = include_str!("sql/adjust_stock.sql");
const DELETE_POST_SQL: &str = include_str!("sql/delete_post.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPostsRepository;

fn optional_amount(column: &str, amount: Option<u64>) -> sqlx::Result<Option<i64>> {
    amount.map(|amount| amount_to_db(column, amount)).transpose()
}

fn storage_names<T: Copy>(values: &[T], as_str: fn(T) -> &'static str) -> Vec<String> {
    values.iter().map(|value| as_str(*value).to_string()).collect()
}

impl PgPostsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_posts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, sqlx::Error> {
        query_as::<Postgres, Post>(LIST_POSTS_SQL)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.route_names.as_slice())
            .bind(filter.hidden)
            .bind(filter.hidden_business)
            .bind(filter.created_by.map(UserUuid::into_uuid))
            .bind(filter.post_categories_tags.as_slice())
            .bind(filter.post_categories_method == TagMatch::Some)
            .bind(i64::from(page.limit()))
            .bind(amount_to_db("offset", page.offset())?)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_posts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &PostFilter,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_POSTS_SQL)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.route_names.as_slice())
            .bind(filter.hidden)
            .bind(filter.hidden_business)
            .bind(filter.created_by.map(UserUuid::into_uuid))
            .bind(filter.post_categories_tags.as_slice())
            .bind(filter.post_categories_method == TagMatch::Some)
            .fetch_one(&mut **tx)
            .await?;

        count_from_db(count)
    }

    pub(crate) async fn get_post(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        post: PostUuid,
        owner: Option<UserUuid>,
        hidden: Option<bool>,
    ) -> Result<Post, sqlx::Error> {
        query_as::<Postgres, Post>(GET_POST_SQL)
            .bind(post.into_uuid())
            .bind(owner.map(UserUuid::into_uuid))
            .bind(hidden)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetches a post and locks it until the transaction ends.
    pub(crate) async fn lock_post(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        post: PostUuid,
    ) -> Result<Option<Post>, sqlx::Error> {
        query_as::<Postgres, Post>(LOCK_POST_SQL)
            .bind(post.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn count_business_posts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        route_name: &str,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_BUSINESS_POSTS_SQL)
            .bind(route_name)
            .fetch_one(&mut **tx)
            .await?;

        count_from_db(count)
    }

    pub(crate) async fn create_post(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        hidden_business: bool,
        post: NewPost,
    ) -> Result<Post, sqlx::Error> {
        query_as::<Postgres, Post>(CREATE_POST_SQL)
            .bind(PostUuid::new().into_uuid())
            .bind(post.route_name)
            .bind(owner.into_uuid())
            .bind(post.name)
            .bind(post.description)
            .bind(post.details)
            .bind(optional_amount("price", post.price)?)
            .bind(optional_amount("discount", post.discount)?)
            .bind(post.currency.map(PostCurrency::as_str))
            .bind(optional_amount("amount_available", post.amount_available)?)
            .bind(storage_names(&post.colors, PostColor::as_str))
            .bind(post.highlights)
            .bind(post.hidden)
            .bind(hidden_business)
            .bind(post.post_categories_tags)
            .bind(storage_names(&post.clothing_sizes, PostClothingSize::as_str))
            .bind(Json(post.images))
            .bind(post.post_page_layout.map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_post(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        post: PostUuid,
        update: PostUpdate,
    ) -> Result<Post, sqlx::Error> {
        let reviews = update
            .reviews
            .map(|reviews| {
                reviews
                    .iter()
                    .map(|count| amount_to_db("reviews", *count))
                    .collect::<sqlx::Result<Vec<i64>>>()
            })
            .transpose()?;

        query_as::<Postgres, Post>(UPDATE_POST_SQL)
            .bind(post.into_uuid())
            .bind(owner.into_uuid())
            .bind(update.currency.map(PostCurrency::as_str))
            .bind(update.description)
            .bind(update.images.map(Json))
            .bind(optional_amount("price", update.price)?)
            .bind(optional_amount("amount_available", update.amount_available)?)
            .bind(
                update
                    .clothing_sizes
                    .map(|sizes| storage_names(&sizes, PostClothingSize::as_str)),
            )
            .bind(
                update
                    .colors
                    .map(|colors| storage_names(&colors, PostColor::as_str)),
            )
            .bind(update.details)
            .bind(update.highlights)
            .bind(update.hidden)
            .bind(update.name)
            .bind(reviews)
            .bind(update.post_categories_tags)
            .bind(optional_amount("discount", update.discount)?)
            .bind(update.post_page_layout.map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    /// Adds `delta` to a tracked stock. Untracked stock is left alone.
    pub(crate) async fn adjust_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        post: PostUuid,
        delta: i64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ADJUST_STOCK_SQL)
            .bind(post.into_uuid())
            .bind(delta)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_post(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        post: PostUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_POST_SQL)
            .bind(post.into_uuid())
            .bind(owner.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_get_reviews(row: &PgRow) -> sqlx::Result<[u64; REVIEW_BUCKETS]> {
    let decode_error = |source: BoxDynError| sqlx::Error::ColumnDecode {
        index: "reviews".to_string(),
        source,
    };

    let stored: Vec<i64> = row.try_get("reviews")?;

    let counts = stored
        .into_iter()
        .map(|count| u64::try_from(count).map_err(|e| decode_error(Box::new(e))))
        .collect::<sqlx::Result<Vec<u64>>>()?;

    <[u64; REVIEW_BUCKETS]>::try_from(counts).map_err(|counts| {
        decode_error(format!("expected {REVIEW_BUCKETS} review buckets, got {}", counts.len()).into())
    })
}

impl<'r> FromRow<'r, PgRow> for Post {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let currency = row
            .try_get::<Option<String>, _>("currency")?
            .map(|value| {
                value.parse().map_err(|source| sqlx::Error::ColumnDecode {
                    index: "currency".to_string(),
                    source: Box::new(source),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: PostUuid::from_uuid(row.try_get("uuid")?),
            route_name: row.try_get("route_name")?,
            created_by: UserUuid::from_uuid(row.try_get("created_by")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            details: row.try_get("details")?,
            price: try_get_optional_amount(row, "price")?,
            discount: try_get_optional_amount(row, "discount")?,
            currency,
            amount_available: try_get_optional_amount(row, "amount_available")?,
            reviews: try_get_reviews(row)?,
            colors: try_get_enum_array(row, "colors")?,
            highlights: row.try_get("highlights")?,
            hidden: row.try_get("hidden")?,
            hidden_business: row.try_get("hidden_business")?,
            post_categories_tags: row.try_get("post_categories_tags")?,
            clothing_sizes: try_get_enum_array(row, "clothing_sizes")?,
            images: row.try_get::<Json<Vec<Image>>, _>("images")?.0,
            post_page_layout: row
                .try_get::<Option<Json<Value>>, _>("post_page_layout")?
                .map(|layout| layout.0),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
