//! Appointment records.
//!
//! An appointment links a patient to a doctor at a date and clock time.
//! There is no uniqueness constraint on `(doctor_id, date, time)`: the store
//! happily records a double booking, and callers that care must check first.

use crate::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use hms_types::ClockTime;
use hms_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of an appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// The fixed wire token for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no-show" => Ok(AppointmentStatus::NoShow),
            _ => Err(DomainError::UnknownToken {
                kind: "appointment status",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Emergency,
    Routine,
}

impl AppointmentType {
    /// The fixed wire token for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "consultation",
            AppointmentType::FollowUp => "follow-up",
            AppointmentType::Emergency => "emergency",
            AppointmentType::Routine => "routine",
        }
    }
}

impl std::str::FromStr for AppointmentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consultation" => Ok(AppointmentType::Consultation),
            "follow-up" => Ok(AppointmentType::FollowUp),
            "emergency" => Ok(AppointmentType::Emergency),
            "routine" => Ok(AppointmentType::Routine),
            _ => Err(DomainError::UnknownToken {
                kind: "appointment type",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An appointment record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Immutable, unique within the appointment collection.
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Patient reference; never checked for existence.
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    /// Doctor reference; never checked for existence.
    #[schema(value_type = String)]
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "10:00")]
    pub time: ClockTime,
    /// Duration in minutes; nominal range 5–180, enforced by the views.
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an appointment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    #[schema(value_type = String)]
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "10:00")]
    pub time: ClockTime,
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

impl AppointmentDraft {
    /// Builds the stored record from this draft.
    pub fn into_appointment(self, id: RecordId, at: DateTime<Utc>) -> Appointment {
        Appointment {
            id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            date: self.date,
            time: self.time,
            duration: self.duration,
            status: self.status,
            kind: self.kind,
            notes: self.notes,
            created_at: at,
        }
    }
}

/// Partial update for an appointment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub patient_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub doctor_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub time: Option<ClockTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<AppointmentType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

impl AppointmentPatch {
    /// Merges this patch into `appointment`, field by field.
    pub fn apply(self, appointment: &mut Appointment) {
        if let Some(v) = self.patient_id {
            appointment.patient_id = v;
        }
        if let Some(v) = self.doctor_id {
            appointment.doctor_id = v;
        }
        if let Some(v) = self.date {
            appointment.date = v;
        }
        if let Some(v) = self.time {
            appointment.time = v;
        }
        if let Some(v) = self.duration {
            appointment.duration = v;
        }
        if let Some(v) = self.status {
            appointment.status = v;
        }
        if let Some(v) = self.kind {
            appointment.kind = v;
        }
        if let Some(v) = self.notes {
            appointment.notes = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> AppointmentDraft {
        AppointmentDraft {
            patient_id: RecordId::new(),
            doctor_id: RecordId::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 20).expect("valid date"),
            time: ClockTime::new(10, 0).expect("valid time"),
            duration: 30,
            status: AppointmentStatus::Scheduled,
            kind: AppointmentType::Consultation,
            notes: Some("Regular checkup".into()),
        }
    }

    #[test]
    fn status_and_type_use_kebab_tokens() {
        let mut appointment = sample_draft().into_appointment(RecordId::new(), Utc::now());
        appointment.status = AppointmentStatus::NoShow;
        appointment.kind = AppointmentType::FollowUp;

        let json = serde_json::to_value(&appointment).expect("serialize");
        assert_eq!(json["status"], "no-show");
        assert_eq!(json["type"], "follow-up");
        assert!(json.get("kind").is_none(), "`kind` must serialise as `type`");
    }

    #[test]
    fn deserialises_from_contract_json() {
        let patient_id = RecordId::new();
        let doctor_id = RecordId::new();
        let json = format!(
            r#"{{
                "patientId": "{patient_id}",
                "doctorId": "{doctor_id}",
                "date": "2024-01-21",
                "time": "14:00",
                "duration": 45,
                "status": "scheduled",
                "type": "consultation",
                "notes": "Knee pain assessment"
            }}"#
        );

        let draft: AppointmentDraft = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(draft.patient_id, patient_id);
        assert_eq!(draft.kind, AppointmentType::Consultation);
        assert_eq!(draft.time.to_string(), "14:00");
    }

    #[test]
    fn patch_updates_status_only() {
        let mut appointment = sample_draft().into_appointment(RecordId::new(), Utc::now());
        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Completed),
            ..AppointmentPatch::default()
        };
        patch.apply(&mut appointment);

        assert_eq!(appointment.status, AppointmentStatus::Completed);
        assert_eq!(appointment.duration, 30);
        assert_eq!(appointment.notes.as_deref(), Some("Regular checkup"));
    }

    #[test]
    fn double_booking_is_representable() {
        let draft = sample_draft();
        let first = draft.clone().into_appointment(RecordId::new(), Utc::now());
        let second = draft.into_appointment(RecordId::new(), Utc::now());
        assert_eq!(first.doctor_id, second.doctor_id);
        assert_eq!(first.date, second.date);
        assert_eq!(first.time, second.time);
        assert_ne!(first.id, second.id);
    }
}
