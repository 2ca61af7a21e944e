//! Plans Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::try_get_enum,
    domain::{
        plans::models::{PlanEntryUuid, PlanHistoryEntry, PlanStatus, PlanType},
        users::models::UserUuid,
    },
};

const CREATE_PLAN_ENTRY_SQL: &str = include_str!("sql/create_plan_entry.sql");
const LIST_PLAN_ENTRIES_SQL: &str = include_str!("sql/list_plan_entries.sql");
const CURRENT_PLAN_TYPE_SQL: &str = include_str!("sql/current_plan_type.sql");
const SET_PLAN_STATUS_SQL: &str = include_str!("sql/set_plan_status.sql");
const RETIRE_CURRENT_PLANS_SQL: &str = include_str!("sql/retire_current_plans.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPlansRepository;

impl PgPlansRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        plan_type: PlanType,
        status: PlanStatus,
        validation_purchase_code: Option<&str>,
    ) -> Result<PlanHistoryEntry, sqlx::Error> {
        query_as::<Postgres, PlanHistoryEntry>(CREATE_PLAN_ENTRY_SQL)
            .bind(PlanEntryUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(plan_type.as_str())
            .bind(status.as_str())
            .bind(validation_purchase_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<PlanHistoryEntry>, sqlx::Error> {
        query_as::<Postgres, PlanHistoryEntry>(LIST_PLAN_ENTRIES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Tier of the most recent `current` entry; `free` when there is none.
    pub(crate) async fn current_plan_type(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<PlanType, sqlx::Error> {
        let stored: Option<String> = query_scalar(CURRENT_PLAN_TYPE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        match stored {
            Some(value) => value.parse().map_err(|source| sqlx::Error::ColumnDecode {
                index: "plan_type".to_string(),
                source: Box::new(source),
            }),
            None => Ok(PlanType::Free),
        }
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        entry: PlanEntryUuid,
        status: PlanStatus,
    ) -> Result<PlanHistoryEntry, sqlx::Error> {
        query_as::<Postgres, PlanHistoryEntry>(SET_PLAN_STATUS_SQL)
            .bind(entry.into_uuid())
            .bind(user.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Marks every `current` entry except `keep` as historical.
    pub(crate) async fn retire_current(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        keep: PlanEntryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RETIRE_CURRENT_PLANS_SQL)
            .bind(user.into_uuid())
            .bind(keep.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PlanHistoryEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PlanEntryUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            plan_type: try_get_enum(row, "plan_type")?,
            date_of_purchase: row
                .try_get::<SqlxTimestamp, _>("date_of_purchase")?
                .to_jiff(),
            trial_mode: row.try_get("trial_mode")?,
            status: try_get_enum(row, "status")?,
            validation_purchase_code: row.try_get("validation_purchase_code")?,
        })
    }
}
