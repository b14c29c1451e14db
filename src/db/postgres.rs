use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::store::{prepare_for_storage, RecordStore};
use crate::error::AppResult;
use crate::models::daily_record::{DailyRecord, Modules, NewDailyRecord, RecordContent};
use crate::services::day_window::{DayWindow, RecordRange};

#[derive(Debug, FromRow)]
struct DailyRecordRow {
    id: Uuid,
    user_id: Uuid,
    record_date: DateTime<Utc>,
    modules: Json<Modules>,
    mood_of_day: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DailyRecordRow> for DailyRecord {
    fn from(row: DailyRecordRow) -> Self {
        Self {
            id: row.id,
            owner: row.user_id,
            record_date: row.record_date,
            modules: row.modules.0,
            mood_of_day: row.mood_of_day,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `daily_records` table; modules live in a JSONB column.
#[derive(Clone)]
pub struct PgRecordStore {
    db: PgPool,
}

impl PgRecordStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_in_window(
        &self,
        owner: Uuid,
        window: &DayWindow,
    ) -> AppResult<Option<DailyRecord>> {
        let row = sqlx::query_as::<_, DailyRecordRow>(
            r#"
            SELECT * FROM daily_records
            WHERE user_id = $1 AND record_date BETWEEN $2 AND $3
            ORDER BY record_date ASC
            LIMIT 1
            "#,
        )
        .bind(owner)
        .bind(window.start)
        .bind(window.end)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(DailyRecord::from))
    }

    async fn insert(&self, record: NewDailyRecord) -> AppResult<DailyRecord> {
        let content = prepare_for_storage(record.content)?;

        let row = sqlx::query_as::<_, DailyRecordRow>(
            r#"
            INSERT INTO daily_records (id, user_id, record_date, modules, mood_of_day)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.owner)
        .bind(record.record_date)
        .bind(Json(&content.modules))
        .bind(&content.mood_of_day)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn replace_content(
        &self,
        owner: Uuid,
        id: Uuid,
        content: RecordContent,
    ) -> AppResult<Option<DailyRecord>> {
        let content = prepare_for_storage(content)?;

        let row = sqlx::query_as::<_, DailyRecordRow>(
            r#"
            UPDATE daily_records SET
                modules = $3,
                mood_of_day = COALESCE($4, mood_of_day),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(Json(&content.modules))
        .bind(&content.mood_of_day)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(DailyRecord::from))
    }

    async fn list(&self, owner: Uuid, range: &RecordRange) -> AppResult<Vec<DailyRecord>> {
        let rows = sqlx::query_as::<_, DailyRecordRow>(
            r#"
            SELECT * FROM daily_records
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR record_date >= $2)
              AND ($3::timestamptz IS NULL OR record_date <= $3)
            ORDER BY record_date DESC
            "#,
        )
        .bind(owner)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(DailyRecord::from).collect())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM daily_records WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
