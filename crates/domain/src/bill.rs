//! Billing records.

use crate::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use hms_types::Money;
use hms_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payment state of a bill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
    Overdue,
}

impl BillStatus {
    /// The fixed wire token for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
        }
    }
}

impl std::str::FromStr for BillStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BillStatus::Pending),
            "paid" => Ok(BillStatus::Paid),
            "overdue" => Ok(BillStatus::Overdue),
            _ => Err(DomainError::UnknownToken {
                kind: "bill status",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bill record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Immutable, unique within the bill collection.
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Patient reference; never checked for existence.
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    /// Optional appointment reference; never checked for existence.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub appointment_id: Option<RecordId>,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub description: String,
    pub status: BillStatus,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a bill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub appointment_id: Option<RecordId>,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub description: String,
    pub status: BillStatus,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paid_date: Option<DateTime<Utc>>,
}

impl BillDraft {
    /// Builds the stored record from this draft.
    pub fn into_bill(self, id: RecordId, at: DateTime<Utc>) -> Bill {
        Bill {
            id,
            patient_id: self.patient_id,
            appointment_id: self.appointment_id,
            amount: self.amount,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
            paid_date: self.paid_date,
            created_at: at,
        }
    }
}

/// Partial update for a bill.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillPatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub patient_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub appointment_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<BillStatus>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paid_date: Option<DateTime<Utc>>,
}

impl BillPatch {
    /// Merges this patch into `bill`, field by field.
    pub fn apply(self, bill: &mut Bill) {
        if let Some(v) = self.patient_id {
            bill.patient_id = v;
        }
        if let Some(v) = self.appointment_id {
            bill.appointment_id = Some(v);
        }
        if let Some(v) = self.amount {
            bill.amount = v;
        }
        if let Some(v) = self.description {
            bill.description = v;
        }
        if let Some(v) = self.status {
            bill.status = v;
        }
        if let Some(v) = self.due_date {
            bill.due_date = v;
        }
        if let Some(v) = self.paid_date {
            bill.paid_date = Some(v);
        }
    }
}
