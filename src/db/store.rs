use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::models::daily_record::{DailyRecord, NewDailyRecord, RecordContent};
use crate::services::bmi;
use crate::services::day_window::{DayWindow, RecordRange};

/// Persistence for daily records.
///
/// Implementations enforce one record per (owner, UTC day) and run
/// [`prepare_for_storage`] on every write. Every lookup is scoped by owner.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_in_window(&self, owner: Uuid, window: &DayWindow)
        -> AppResult<Option<DailyRecord>>;

    async fn insert(&self, record: NewDailyRecord) -> AppResult<DailyRecord>;

    /// Replace the modules of an owned record. `Ok(None)` when the record is
    /// absent or belongs to someone else.
    async fn replace_content(
        &self,
        owner: Uuid,
        id: Uuid,
        content: RecordContent,
    ) -> AppResult<Option<DailyRecord>>;

    /// Owned records inside `range`, newest first.
    async fn list(&self, owner: Uuid, range: &RecordRange) -> AppResult<Vec<DailyRecord>>;

    /// `Ok(false)` when nothing owned by `owner` had that id.
    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

/// Write-time normalization: trim the sleep medication name, validate, and
/// recompute BMI so no write path can persist a stale value.
pub fn prepare_for_storage(mut content: RecordContent) -> AppResult<RecordContent> {
    if let Some(sleep) = content.modules.sleep.as_mut() {
        if let Some(name) = sleep.medication_name.as_mut() {
            let trimmed = name.trim();
            if trimmed.len() != name.len() {
                *name = trimmed.to_string();
            }
        }
    }

    content.modules.validate()?;

    if let Some(weight) = content.modules.weight.as_mut() {
        bmi::apply(weight);
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::daily_record::{Modules, Sleep, Weight};

    #[test]
    fn test_prepare_recomputes_bmi() {
        let content = RecordContent {
            modules: Modules {
                weight: Some(Weight {
                    weight_kg: Some(70.0),
                    height_m: Some(1.75),
                    bmi: Some(1.0),
                    target_weight_kg: Some(65.0),
                }),
                ..Default::default()
            },
            mood_of_day: None,
        };
        let prepared = prepare_for_storage(content).unwrap();
        let weight = prepared.modules.weight.unwrap();
        assert_eq!(weight.bmi, Some(22.86));
        assert_eq!(weight.target_weight_kg, Some(65.0));
    }

    #[test]
    fn test_prepare_trims_medication_name() {
        let content = RecordContent {
            modules: Modules {
                sleep: Some(Sleep {
                    uses_medication: true,
                    medication_name: Some("  melatonin ".into()),
                    medication_time: Some("22:30".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            mood_of_day: None,
        };
        let prepared = prepare_for_storage(content).unwrap();
        let sleep = prepared.modules.sleep.unwrap();
        assert_eq!(sleep.medication_name.as_deref(), Some("melatonin"));
    }

    #[test]
    fn test_prepare_rejects_missing_sleep_medication() {
        let content = RecordContent {
            modules: Modules {
                sleep: Some(Sleep {
                    uses_medication: true,
                    medication_name: Some(String::new()),
                    medication_time: Some("22:30".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            mood_of_day: None,
        };
        match prepare_for_storage(content) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("Medication name is required"), "{msg}")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
