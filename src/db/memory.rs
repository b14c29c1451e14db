use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::store::{prepare_for_storage, RecordStore};
use crate::error::{AppError, AppResult};
use crate::models::daily_record::{DailyRecord, NewDailyRecord, RecordContent};
use crate::services::day_window::{DayWindow, RecordRange};

/// In-process store with the same (owner, day) uniqueness as the Postgres one.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<Uuid, DailyRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_in_window(
        &self,
        owner: Uuid,
        window: &DayWindow,
    ) -> AppResult<Option<DailyRecord>> {
        let records = self.records.lock().await;
        Ok(records
            .values()
            .filter(|r| r.owner == owner && window.contains(r.record_date))
            .min_by_key(|r| r.record_date)
            .cloned())
    }

    async fn insert(&self, record: NewDailyRecord) -> AppResult<DailyRecord> {
        let content = prepare_for_storage(record.content)?;
        let day = record.record_date.date_naive();

        let mut records = self.records.lock().await;
        if records
            .values()
            .any(|r| r.owner == record.owner && r.record_date.date_naive() == day)
        {
            return Err(AppError::Validation(
                "A record already exists for this date".into(),
            ));
        }

        let now = Utc::now();
        let created = DailyRecord {
            id: Uuid::new_v4(),
            owner: record.owner,
            record_date: record.record_date,
            modules: content.modules,
            mood_of_day: content.mood_of_day,
            created_at: now,
            updated_at: now,
        };
        records.insert(created.id, created.clone());
        Ok(created)
    }

    async fn replace_content(
        &self,
        owner: Uuid,
        id: Uuid,
        content: RecordContent,
    ) -> AppResult<Option<DailyRecord>> {
        let content = prepare_for_storage(content)?;

        let mut records = self.records.lock().await;
        let Some(record) = records.get_mut(&id).filter(|r| r.owner == owner) else {
            return Ok(None);
        };
        record.modules = content.modules;
        if content.mood_of_day.is_some() {
            record.mood_of_day = content.mood_of_day;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn list(&self, owner: Uuid, range: &RecordRange) -> AppResult<Vec<DailyRecord>> {
        let records = self.records.lock().await;
        let mut found: Vec<DailyRecord> = records
            .values()
            .filter(|r| r.owner == owner && range.contains(r.record_date))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.record_date.cmp(&a.record_date));
        Ok(found)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        match records.get(&id) {
            Some(r) if r.owner == owner => {
                records.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
