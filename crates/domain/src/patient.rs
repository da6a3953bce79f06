//! Patient records and their create/update shapes.
//!
//! A patient is the anchor entity of the system: appointments, medical
//! records and bills all refer back to a patient id. The record also carries
//! `medical_history`, an ordered list of medical-record ids; entries are
//! appended by callers and never validated for existence here.
//!
//! `updated_at` is the only mutation timestamp in the data model: it is
//! refreshed on every successful update of a patient and left untouched by
//! every other entity.

use crate::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use hms_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Administrative gender of a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// The fixed wire token for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(DomainError::UnknownToken {
                kind: "gender",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who to contact in an emergency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// A patient record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Immutable, unique within the patient collection.
    #[schema(value_type = String)]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: String,
    pub blood_type: String,
    pub emergency_contact: EmergencyContact,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub insurance_id: Option<String>,
    /// Ordered medical-record references. Not checked for existence.
    #[schema(value_type = Vec<String>)]
    pub medical_history: Vec<RecordId>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a patient: everything except the id and timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: String,
    pub blood_type: String,
    pub emergency_contact: EmergencyContact,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub insurance_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub medical_history: Vec<RecordId>,
}

impl PatientDraft {
    /// Builds the stored record from this draft.
    pub fn into_patient(self, id: RecordId, at: DateTime<Utc>) -> Patient {
        Patient {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: self.address,
            blood_type: self.blood_type,
            emergency_contact: self.emergency_contact,
            insurance_id: self.insurance_id,
            medical_history: self.medical_history,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Partial update for a patient; absent fields are left untouched.
///
/// The merge is shallow: `emergency_contact` and `medical_history` are
/// replaced wholesale when present. Optional fields can be set but not
/// cleared through a patch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientPatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub insurance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub medical_history: Option<Vec<RecordId>>,
}

impl PatientPatch {
    /// Merges this patch into `patient`, field by field.
    ///
    /// The caller (the data service) is responsible for refreshing
    /// `updated_at` afterwards; this function only moves field values.
    pub fn apply(self, patient: &mut Patient) {
        if let Some(v) = self.first_name {
            patient.first_name = v;
        }
        if let Some(v) = self.last_name {
            patient.last_name = v;
        }
        if let Some(v) = self.email {
            patient.email = v;
        }
        if let Some(v) = self.phone {
            patient.phone = v;
        }
        if let Some(v) = self.date_of_birth {
            patient.date_of_birth = v;
        }
        if let Some(v) = self.gender {
            patient.gender = v;
        }
        if let Some(v) = self.address {
            patient.address = v;
        }
        if let Some(v) = self.blood_type {
            patient.blood_type = v;
        }
        if let Some(v) = self.emergency_contact {
            patient.emergency_contact = v;
        }
        if let Some(v) = self.insurance_id {
            patient.insurance_id = Some(v);
        }
        if let Some(v) = self.medical_history {
            patient.medical_history = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> PatientDraft {
        PatientDraft {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane.doe@example.com".into(),
            phone: "+44 20 7946 0000".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 7, 22).expect("valid date"),
            gender: Gender::Female,
            address: "12 Harley Street, London".into(),
            blood_type: "O-".into(),
            emergency_contact: EmergencyContact {
                name: "John Doe".into(),
                phone: "+44 20 7946 0001".into(),
                relationship: "Spouse".into(),
            },
            insurance_id: Some("INS001234".into()),
            medical_history: vec![],
        }
    }

    #[test]
    fn serialises_with_contract_field_names() {
        let at = "2024-01-15T10:00:00Z".parse().expect("valid timestamp");
        let patient = sample_draft().into_patient(RecordId::new(), at);
        let json = serde_json::to_value(&patient).expect("serialize");

        for key in [
            "id",
            "firstName",
            "lastName",
            "dateOfBirth",
            "bloodType",
            "emergencyContact",
            "insuranceId",
            "medicalHistory",
            "createdAt",
            "updatedAt",
        ] {
            assert!(json.get(key).is_some(), "missing wire key {key}");
        }
        assert_eq!(json["gender"], "female");
        assert_eq!(json["dateOfBirth"], "1990-07-22");
        assert_eq!(json["emergencyContact"]["relationship"], "Spouse");
    }

    #[test]
    fn omits_absent_insurance_id() {
        let at = Utc::now();
        let mut draft = sample_draft();
        draft.insurance_id = None;
        let json = serde_json::to_value(draft.into_patient(RecordId::new(), at)).expect("serialize");
        assert!(json.get("insuranceId").is_none());
    }

    #[test]
    fn draft_sets_both_timestamps_to_creation_instant() {
        let at = Utc::now();
        let patient = sample_draft().into_patient(RecordId::new(), at);
        assert_eq!(patient.created_at, at);
        assert_eq!(patient.updated_at, at);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let at = Utc::now();
        let mut patient = sample_draft().into_patient(RecordId::new(), at);

        let patch = PatientPatch {
            blood_type: Some("AB+".into()),
            ..PatientPatch::default()
        };
        patch.apply(&mut patient);

        assert_eq!(patient.blood_type, "AB+");
        assert_eq!(patient.first_name, "Jane");
        assert_eq!(patient.email, "jane.doe@example.com");
        assert_eq!(patient.insurance_id.as_deref(), Some("INS001234"));
    }

    #[test]
    fn gender_tokens_parse_back() {
        for g in [Gender::Male, Gender::Female, Gender::Other] {
            let parsed: Gender = g.as_str().parse().expect("round trip");
            assert_eq!(parsed, g);
        }
        assert!("unknown".parse::<Gender>().is_err());
    }
}
