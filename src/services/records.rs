use uuid::Uuid;

use crate::db::RecordStore;
use crate::error::{AppError, AppResult};
use crate::models::daily_record::{
    DailyRecord, NewDailyRecord, RecordContent, RecordQuery, SleepNote,
};
use crate::services::bmi;
use crate::services::day_window::{DayWindow, RecordRange};

/// Outcome of [`submit_record`]. Handlers map it to 201 or 200.
#[derive(Debug)]
pub enum Submission {
    Created(DailyRecord),
    Updated(DailyRecord),
}

impl Submission {
    pub fn record(&self) -> &DailyRecord {
        match self {
            Submission::Created(r) | Submission::Updated(r) => r,
        }
    }
}

/// Derive BMI before the write so the response carries it.
fn derive_request_bmi(content: &mut RecordContent) {
    if let Some(weight) = content.modules.weight.as_mut() {
        bmi::apply(weight);
    }
}

/// Upsert the owner's record for `date`. An existing record for that day has
/// its modules replaced wholesale; otherwise a new one is written at noon UTC.
pub async fn submit_record(
    store: &dyn RecordStore,
    owner: Uuid,
    date: &str,
    mut content: RecordContent,
) -> AppResult<Submission> {
    derive_request_bmi(&mut content);
    let window = DayWindow::parse(date)?;

    if let Some(existing) = store.find_in_window(owner, &window).await? {
        let updated = store
            .replace_content(owner, existing.id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("Record not found".into()))?;
        tracing::info!(
            owner = %owner,
            record_id = %updated.id,
            day = %window.day,
            "Daily record updated"
        );
        return Ok(Submission::Updated(updated));
    }

    let created = store
        .insert(NewDailyRecord {
            owner,
            record_date: window.canonical(),
            content,
        })
        .await?;
    tracing::info!(
        owner = %owner,
        record_id = %created.id,
        day = %window.day,
        "Daily record created"
    );
    Ok(Submission::Created(created))
}

pub async fn list_records(
    store: &dyn RecordStore,
    owner: Uuid,
    query: &RecordQuery,
) -> AppResult<Vec<DailyRecord>> {
    let range = RecordRange::parse(query.start_date.as_deref(), query.end_date.as_deref())?;
    store.list(owner, &range).await
}

pub async fn get_record_by_date(
    store: &dyn RecordStore,
    owner: Uuid,
    date: &str,
) -> AppResult<DailyRecord> {
    let window = DayWindow::parse(date)?;
    store
        .find_in_window(owner, &window)
        .await?
        .ok_or_else(|| AppError::NotFound("No record for this date".into()))
}

/// Same replace semantics as [`submit_record`], addressed by id. Never creates.
pub async fn update_record(
    store: &dyn RecordStore,
    owner: Uuid,
    id: Uuid,
    mut content: RecordContent,
) -> AppResult<DailyRecord> {
    derive_request_bmi(&mut content);
    let updated = store
        .replace_content(owner, id, content)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Record not found or you do not have permission to edit it".into())
        })?;
    tracing::info!(owner = %owner, record_id = %id, "Daily record replaced");
    Ok(updated)
}

pub async fn delete_record(store: &dyn RecordStore, owner: Uuid, id: Uuid) -> AppResult<()> {
    if !store.delete(owner, id).await? {
        return Err(AppError::NotFound("Record not found".into()));
    }
    tracing::info!(owner = %owner, record_id = %id, "Daily record deleted");
    Ok(())
}

/// Non-empty sleep notes across all of the owner's records, newest first.
/// Rebuilt from the records on every call.
pub async fn list_sleep_notes(store: &dyn RecordStore, owner: Uuid) -> AppResult<Vec<SleepNote>> {
    let records = store.list(owner, &RecordRange::default()).await?;
    Ok(records
        .into_iter()
        .filter_map(|record| {
            let note = record.modules.sleep.as_ref()?.note()?.to_string();
            Some(SleepNote {
                date: record.record_date,
                note,
            })
        })
        .collect())
}
