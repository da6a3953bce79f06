//! Doctor records, including weekly availability schedules.

use chrono::{DateTime, Utc};
use hms_types::ClockTime;
use hms_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One weekly availability window in a doctor's schedule.
///
/// `day_of_week` follows the 0–6 Sunday-to-Saturday convention of the
/// consuming views. The core stores whatever it is given; range enforcement
/// is the calling layer's job, like every other field constraint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub day_of_week: u8,
    #[schema(value_type = String, example = "09:00")]
    pub start_time: ClockTime,
    #[schema(value_type = String, example = "17:00")]
    pub end_time: ClockTime,
    pub is_available: bool,
}

/// A doctor record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Immutable, unique within the doctor collection.
    #[schema(value_type = String)]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    /// Years of experience.
    pub experience: u32,
    pub education: String,
    pub license_number: String,
    /// Ordered weekly availability windows.
    pub schedule: Vec<ScheduleSlot>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a doctor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub experience: u32,
    pub education: String,
    pub license_number: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
    pub is_active: bool,
}

impl DoctorDraft {
    /// Builds the stored record from this draft.
    pub fn into_doctor(self, id: RecordId, at: DateTime<Utc>) -> Doctor {
        Doctor {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            specialization: self.specialization,
            experience: self.experience,
            education: self.education,
            license_number: self.license_number,
            schedule: self.schedule,
            is_active: self.is_active,
            created_at: at,
        }
    }
}

/// Partial update for a doctor; the schedule is replaced wholesale when given.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schedule: Option<Vec<ScheduleSlot>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_active: Option<bool>,
}

impl DoctorPatch {
    /// Merges this patch into `doctor`, field by field.
    pub fn apply(self, doctor: &mut Doctor) {
        if let Some(v) = self.first_name {
            doctor.first_name = v;
        }
        if let Some(v) = self.last_name {
            doctor.last_name = v;
        }
        if let Some(v) = self.email {
            doctor.email = v;
        }
        if let Some(v) = self.phone {
            doctor.phone = v;
        }
        if let Some(v) = self.specialization {
            doctor.specialization = v;
        }
        if let Some(v) = self.experience {
            doctor.experience = v;
        }
        if let Some(v) = self.education {
            doctor.education = v;
        }
        if let Some(v) = self.license_number {
            doctor.license_number = v;
        }
        if let Some(v) = self.schedule {
            doctor.schedule = v;
        }
        if let Some(v) = self.is_active {
            doctor.is_active = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekday_slot(day: u8) -> ScheduleSlot {
        ScheduleSlot {
            day_of_week: day,
            start_time: ClockTime::new(9, 0).expect("valid time"),
            end_time: ClockTime::new(17, 0).expect("valid time"),
            is_available: true,
        }
    }

    fn sample_draft() -> DoctorDraft {
        DoctorDraft {
            first_name: "Aisha".into(),
            last_name: "Khan".into(),
            email: "aisha.khan@hospital.example".into(),
            phone: "+44 161 496 0000".into(),
            specialization: "Cardiology".into(),
            experience: 12,
            education: "MB ChB, University of Manchester".into(),
            license_number: "GMC1234567".into(),
            schedule: (1..=5).map(weekday_slot).collect(),
            is_active: true,
        }
    }

    #[test]
    fn schedule_serialises_with_clock_time_strings() {
        let doctor = sample_draft().into_doctor(RecordId::new(), Utc::now());
        let json = serde_json::to_value(&doctor).expect("serialize");

        let slot = &json["schedule"][0];
        assert_eq!(slot["dayOfWeek"], 1);
        assert_eq!(slot["startTime"], "09:00");
        assert_eq!(slot["endTime"], "17:00");
        assert_eq!(slot["isAvailable"], true);
        assert_eq!(json["licenseNumber"], "GMC1234567");
    }

    #[test]
    fn patch_replaces_schedule_wholesale() {
        let mut doctor = sample_draft().into_doctor(RecordId::new(), Utc::now());
        assert_eq!(doctor.schedule.len(), 5);

        let patch = DoctorPatch {
            schedule: Some(vec![weekday_slot(3)]),
            is_active: Some(false),
            ..DoctorPatch::default()
        };
        patch.apply(&mut doctor);

        assert_eq!(doctor.schedule.len(), 1);
        assert_eq!(doctor.schedule[0].day_of_week, 3);
        assert!(!doctor.is_active);
        assert_eq!(doctor.specialization, "Cardiology");
    }
}
