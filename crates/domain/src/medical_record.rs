//! Medical records: diagnosis, treatment and prescribed medications.

use chrono::{DateTime, NaiveDate, Utc};
use hms_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One prescribed medication line within a medical record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instructions: Option<String>,
}

/// A medical record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    /// Immutable, unique within the medical-record collection.
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Patient reference; never checked for existence.
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    /// Doctor reference; never checked for existence.
    #[schema(value_type = String)]
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub symptoms: String,
    pub treatment: String,
    /// Ordered list of prescriptions.
    pub medications: Vec<Medication>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attachments: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a medical record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordDraft {
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    #[schema(value_type = String)]
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub symptoms: String,
    pub treatment: String,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attachments: Option<Vec<String>>,
}

impl MedicalRecordDraft {
    /// Builds the stored record from this draft.
    pub fn into_record(self, id: RecordId, at: DateTime<Utc>) -> MedicalRecord {
        MedicalRecord {
            id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            date: self.date,
            diagnosis: self.diagnosis,
            symptoms: self.symptoms,
            treatment: self.treatment,
            medications: self.medications,
            notes: self.notes,
            attachments: self.attachments,
            created_at: at,
        }
    }
}

/// Partial update for a medical record; lists are replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordPatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub patient_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub doctor_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub symptoms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub treatment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub medications: Option<Vec<Medication>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attachments: Option<Vec<String>>,
}

impl MedicalRecordPatch {
    /// Merges this patch into `record`, field by field.
    pub fn apply(self, record: &mut MedicalRecord) {
        if let Some(v) = self.patient_id {
            record.patient_id = v;
        }
        if let Some(v) = self.doctor_id {
            record.doctor_id = v;
        }
        if let Some(v) = self.date {
            record.date = v;
        }
        if let Some(v) = self.diagnosis {
            record.diagnosis = v;
        }
        if let Some(v) = self.symptoms {
            record.symptoms = v;
        }
        if let Some(v) = self.treatment {
            record.treatment = v;
        }
        if let Some(v) = self.medications {
            record.medications = v;
        }
        if let Some(v) = self.notes {
            record.notes = Some(v);
        }
        if let Some(v) = self.attachments {
            record.attachments = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> MedicalRecordDraft {
        MedicalRecordDraft {
            patient_id: RecordId::new(),
            doctor_id: RecordId::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 20).expect("valid date"),
            diagnosis: "Hypertension".into(),
            symptoms: "Headache, elevated blood pressure".into(),
            treatment: "Lifestyle changes and medication".into(),
            medications: vec![Medication {
                name: "Amlodipine".into(),
                dosage: "5mg".into(),
                frequency: "Once daily".into(),
                duration: "3 months".into(),
                instructions: Some("Take in the morning".into()),
            }],
            notes: Some("Patient advised to reduce salt intake.".into()),
            attachments: None,
        }
    }

    #[test]
    fn serialises_medications_in_order() {
        let mut draft = sample_draft();
        draft.medications.push(Medication {
            name: "Lisinopril".into(),
            dosage: "10mg".into(),
            frequency: "Once daily".into(),
            duration: "3 months".into(),
            instructions: None,
        });

        let record = draft.into_record(RecordId::new(), Utc::now());
        let json = serde_json::to_value(&record).expect("serialize");

        assert_eq!(json["medications"][0]["name"], "Amlodipine");
        assert_eq!(json["medications"][1]["name"], "Lisinopril");
        assert!(json["medications"][1].get("instructions").is_none());
        assert!(json.get("attachments").is_none());
    }

    #[test]
    fn patch_can_amend_diagnosis_without_losing_medications() {
        let mut record = sample_draft().into_record(RecordId::new(), Utc::now());
        let patch = MedicalRecordPatch {
            diagnosis: Some("Stage 1 hypertension".into()),
            ..MedicalRecordPatch::default()
        };
        patch.apply(&mut record);

        assert_eq!(record.diagnosis, "Stage 1 hypertension");
        assert_eq!(record.medications.len(), 1);
        assert_eq!(record.treatment, "Lifestyle changes and medication");
    }
}
