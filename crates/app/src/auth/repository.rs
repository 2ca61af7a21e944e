//! Auth repository.

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::models::{ActiveSession, NewSession},
    domain::users::models::UserUuid,
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_SESSION_SQL: &str = include_str!("sql/find_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const DELETE_SESSION_SQL: &str = include_str!("sql/delete_session.sql");
const CREATE_VALIDATION_CODE_SQL: &str = include_str!("sql/create_validation_code.sql");
const CONSUME_VALIDATION_CODE_SQL: &str = include_str!("sql/consume_validation_code.sql");
const GET_PASSWORD_HASH_SQL: &str = include_str!("sql/get_password_hash.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &NewSession,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_SQL)
            .bind(session.uuid)
            .bind(session.user_uuid.into_uuid())
            .bind(&session.token_hash)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: Uuid,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_SESSION_SQL)
            .bind(session)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn touch_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_SQL)
            .bind(session)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SESSION_SQL)
            .bind(session)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_validation_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        code: &str,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_VALIDATION_CODE_SQL)
            .bind(Uuid::now_v7())
            .bind(user.into_uuid())
            .bind(code)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Deletes a matching code, returning how many were consumed.
    pub(crate) async fn consume_validation_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        code: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CONSUME_VALIDATION_CODE_SQL)
            .bind(user.into_uuid())
            .bind(code)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn password_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<String, sqlx::Error> {
        query_scalar(GET_PASSWORD_HASH_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            token_hash: row.try_get("token_hash")?,
        })
    }
}
