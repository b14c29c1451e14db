use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::daily_record::{
    DailyRecord, RecordContent, RecordQuery, SleepNote, SubmitRecordRequest, UpdateRecordRequest,
};
use crate::services::records::{self, Submission};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_record_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid record id '{raw}'")))
}

pub async fn submit_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<SubmitRecordRequest>, AppError>,
) -> AppResult<(StatusCode, Json<DailyRecord>)> {
    let content = RecordContent {
        modules: body.modules,
        mood_of_day: body.mood_of_day,
    };

    match records::submit_record(state.store.as_ref(), auth_user.id, &body.date, content).await? {
        Submission::Created(record) => Ok((StatusCode::CREATED, Json(record))),
        Submission::Updated(record) => Ok((StatusCode::OK, Json(record))),
    }
}

pub async fn list_records(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<RecordQuery>, AppError>,
) -> AppResult<Json<Vec<DailyRecord>>> {
    let records = records::list_records(state.store.as_ref(), auth_user.id, &query).await?;
    Ok(Json(records))
}

pub async fn list_sleep_notes(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<SleepNote>>> {
    let notes = records::list_sleep_notes(state.store.as_ref(), auth_user.id).await?;
    Ok(Json(notes))
}

/// `GET /api/records/:key`, where the key is a `YYYY-MM-DD` date.
pub async fn get_record_by_date(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Path(date), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<DailyRecord>> {
    let record = records::get_record_by_date(state.store.as_ref(), auth_user.id, &date).await?;
    Ok(Json(record))
}

/// `PUT /api/records/:key`, where the key is a record id.
pub async fn update_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateRecordRequest>, AppError>,
) -> AppResult<Json<DailyRecord>> {
    let id = parse_record_id(&id)?;
    let content = RecordContent {
        modules: body.modules,
        mood_of_day: body.mood_of_day,
    };
    let record = records::update_record(state.store.as_ref(), auth_user.id, id, content).await?;
    Ok(Json(record))
}

/// `DELETE /api/records/:key`, where the key is a record id.
pub async fn delete_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_record_id(&id)?;
    records::delete_record(state.store.as_ref(), auth_user.id, id).await?;
    Ok(Json(MessageResponse {
        message: "Record deleted successfully".into(),
    }))
}
