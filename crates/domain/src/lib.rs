//! # HMS Domain
//!
//! Entity definitions for the hospital management system.
//!
//! Five collections are managed by the data service (patients, doctors,
//! appointments, medical records and bills), plus the `User` identity the
//! session store tracks. Each entity module defines three shapes:
//!
//! - the record itself, keyed by an immutable [`RecordId`](hms_uuid::RecordId);
//! - a *draft* (`XxxDraft`): every field except the id and creation
//!   timestamps, consumed by `create`;
//! - a *patch* (`XxxPatch`): every field optional, consumed by `update` and
//!   applied as a typed shallow merge.
//!
//! Wire field names are an external contract: view components bind to them by
//! name, so every struct serialises with camelCase keys and every enum with
//! its fixed lowercase/kebab-case token. Do not rename fields here without a
//! coordinated change in every consumer.
//!
//! Foreign keys (`patient_id`, `doctor_id`, `appointment_id`) are *not*
//! validated against the referenced collection anywhere in the core; a
//! dangling reference is representable by design.

pub mod appointment;
pub mod bill;
pub mod doctor;
pub mod medical_record;
pub mod patient;
pub mod stats;
pub mod user;

pub use appointment::{Appointment, AppointmentDraft, AppointmentPatch, AppointmentStatus, AppointmentType};
pub use bill::{Bill, BillDraft, BillPatch, BillStatus};
pub use doctor::{Doctor, DoctorDraft, DoctorPatch, ScheduleSlot};
pub use medical_record::{MedicalRecord, MedicalRecordDraft, MedicalRecordPatch, Medication};
pub use patient::{EmergencyContact, Gender, Patient, PatientDraft, PatientPatch};
pub use stats::{DashboardStats, MonthlyAppointments};
pub use user::{User, UserRole};

/// Errors raised by domain-level parsing (enum tokens from CLI or query input).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// An enum token did not match any known value.
    #[error("unknown {kind} '{value}'")]
    UnknownToken {
        kind: &'static str,
        value: String,
    },
}
