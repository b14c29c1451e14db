use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// All of one user's logged health data for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: Uuid,
    pub owner: Uuid,
    /// Calendar day, stored at 12:00:00.000 UTC.
    pub record_date: DateTime<Utc>,
    pub modules: Modules,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_of_day: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The per-day modules. Writes replace this value wholesale; a module left
/// out of a write is dropped from the record, never merged from the old one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Modules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardiovascular: Option<Cardiovascular>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate]
    pub sleep: Option<Sleep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate]
    pub exercise: Option<Exercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate]
    pub weight: Option<Weight>,
    pub medication: Vec<MedicationDose>,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cardiovascular {
    pub systolic_pressure: Option<f64>,
    pub diastolic_pressure: Option<f64>,
    pub heart_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "validate_sleep_medication", skip_on_field_errors = false))]
pub struct Sleep {
    pub duration_hours: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0, message = "Sleep quality must be between 1 and 5"))]
    pub perceived_quality: Option<f64>,
    pub notes: Option<String>,
    pub uses_medication: bool,
    pub medication_name: Option<String>,
    /// Time of day the medication was taken, e.g. `22:30`.
    pub medication_time: Option<String>,
}

impl Sleep {
    /// Medication name and time are required once `uses_medication` is set.
    pub fn check_medication(&self) -> Result<(), ValidationError> {
        if !self.uses_medication {
            return Ok(());
        }
        if is_blank(self.medication_name.as_deref()) {
            return Err(medication_error(
                "medication_name_required",
                "Medication name is required when sleep medication is used",
            ));
        }
        if is_blank(self.medication_time.as_deref()) {
            return Err(medication_error(
                "medication_time_required",
                "Medication time is required when sleep medication is used",
            ));
        }
        Ok(())
    }

    /// Non-empty sleep note, if any.
    pub fn note(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }
}

fn validate_sleep_medication(sleep: &Sleep) -> Result<(), ValidationError> {
    sleep.check_medication()
}

fn medication_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    pub activity_type: Option<String>,
    pub duration_minutes: Option<f64>,
    #[validate(range(min = 1.0, max = 10.0, message = "Perceived effort must be between 1 and 10"))]
    pub perceived_effort: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Weight {
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.5, max = 2.5, message = "Height must be between 0.5 and 2.5 m"))]
    pub height_m: Option<f64>,
    /// Derived from weight and height on every write.
    pub bmi: Option<f64>,
    pub target_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicationDose {
    pub medication_ref: Option<String>,
    pub dose_taken: Option<bool>,
    pub administered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appointment {
    pub appointment_date: Option<DateTime<Utc>>,
    pub specialty: Option<String>,
    pub reason: Option<String>,
    pub reminder_active: Option<bool>,
}

/// Day-level content written by a submit or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordContent {
    pub modules: Modules,
    /// `None` keeps whatever mood is already stored.
    pub mood_of_day: Option<String>,
}

/// A record about to be inserted.
#[derive(Debug, Clone)]
pub struct NewDailyRecord {
    pub owner: Uuid,
    pub record_date: DateTime<Utc>,
    pub content: RecordContent,
}

/// Projection served by the notes book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepNote {
    pub date: DateTime<Utc>,
    pub note: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRecordRequest {
    /// Calendar day as `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub modules: Modules,
    pub mood_of_day: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    #[serde(default)]
    pub modules: Modules,
    pub mood_of_day: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
