//! The in-memory data service.
//!
//! [`HospitalService`] is the only component permitted to touch the five
//! entity collections. It is a cheap-to-clone handle: clones share one set of
//! collections behind a single async lock, so every operation is atomic with
//! respect to every other operation in the process: no torn reads or writes,
//! and key uniqueness is the only constraint the store enforces.
//!
//! Operation semantics, uniform per entity type:
//!
//! - `list` returns all records in insertion order and never fails;
//! - `get` returns `None` for an absent key;
//! - `create` assigns a fresh id and creation timestamp, appends, and returns
//!   the created record; the service performs no field validation;
//! - `update` shallow-merges a typed patch over the existing record (absent
//!   fields untouched) and refreshes `updated_at` where the entity has one;
//! - `delete` returns `false`, not an error, for an absent key.
//!
//! Every operation first sleeps for its configured latency class, emulating a
//! remote backend. Callers must await one mutation before issuing a dependent
//! read; independent collections can be queried concurrently.

use crate::config::CoreConfig;
use crate::error::ServiceResult;
use crate::demo;
use crate::stats;
use crate::store::Collections;
use chrono::Utc;
use hms_domain::{
    Appointment, AppointmentDraft, AppointmentPatch, Bill, BillDraft, BillPatch, DashboardStats,
    Doctor, DoctorDraft, DoctorPatch, MedicalRecord, MedicalRecordDraft, MedicalRecordPatch,
    Patient, PatientDraft, PatientPatch, User, UserRole,
};
use hms_uuid::RecordId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// The opaque token issued by the mock login.
pub(crate) const MOCK_SESSION_TOKEN: &str = "mock-jwt-token";

/// Identifier of the fixed administrative user, in canonical form.
const ADMIN_USER_ID: &str = "00000000000000000000000000000001";

/// The fixed administrative identity returned by the mock login.
///
/// Stub behaviour: until real credential verification exists, every login
/// resolves to this user.
pub(crate) fn administrative_user() -> User {
    User {
        id: RecordId::parse(ADMIN_USER_ID).expect("admin id literal is canonical"),
        username: "admin".into(),
        email: "admin@hospital.com".into(),
        first_name: "Admin".into(),
        last_name: "User".into(),
        role: UserRole::Admin,
        is_active: true,
        created_at: chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .expect("admin creation timestamp literal is valid")
            .with_timezone(&Utc),
    }
}

/// Successful login result: the authenticated identity and its session token.
#[derive(Clone, Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

/// Handle to the process-wide in-memory repository.
#[derive(Clone)]
pub struct HospitalService {
    collections: Arc<Mutex<Collections>>,
    config: CoreConfig,
}

impl HospitalService {
    /// Creates a service with empty collections.
    pub fn new(config: CoreConfig) -> Self {
        Self {
            collections: Arc::new(Mutex::new(Collections::default())),
            config,
        }
    }

    /// Creates a service pre-populated with a small demonstration data set,
    /// for the binaries. Tests start from [`HospitalService::new`] instead.
    pub fn with_demo_data(config: CoreConfig) -> Self {
        Self {
            collections: Arc::new(Mutex::new(demo::collections())),
            config,
        }
    }

    async fn simulate(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Mock login: accepts any credentials and returns the fixed
    /// administrative user with an opaque token.
    ///
    /// This is a placeholder, not a security design. A production deployment
    /// MUST replace it with real verification; the
    /// [`crate::ServiceError::AuthenticationFailed`] path exists so that
    /// callers are already written against a fallible contract.
    pub async fn login(&self, _username: &str, _password: &str) -> ServiceResult<LoginOutcome> {
        self.simulate(self.config.latency().login).await;
        Ok(LoginOutcome {
            user: administrative_user(),
            token: MOCK_SESSION_TOKEN.to_owned(),
        })
    }

    /// Mock logout. The data service keeps no session state; only the delay
    /// is simulated here.
    pub async fn logout(&self) {
        self.simulate(self.config.latency().logout).await;
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Aggregates the dashboard numbers from the current collections.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        self.simulate(self.config.latency().stats).await;
        let collections = self.collections.lock().await;
        stats::compute(&collections, Utc::now().date_naive())
    }

    // ========================================================================
    // Patients
    // ========================================================================

    pub async fn list_patients(&self) -> Vec<Patient> {
        self.simulate(self.config.latency().list).await;
        self.collections.lock().await.patients.list()
    }

    pub async fn get_patient(&self, id: &RecordId) -> Option<Patient> {
        self.simulate(self.config.latency().fetch).await;
        self.collections.lock().await.patients.get(id).cloned()
    }

    pub async fn create_patient(&self, draft: PatientDraft) -> Patient {
        self.simulate(self.config.latency().mutate).await;
        let patient = draft.into_patient(RecordId::new(), Utc::now());
        let mut collections = self.collections.lock().await;
        collections.patients.insert(patient.clone());
        patient
    }

    /// Shallow-merges `patch` over the stored patient and refreshes
    /// `updated_at`. Returns `None` if the id is absent.
    pub async fn update_patient(&self, id: &RecordId, patch: PatientPatch) -> Option<Patient> {
        self.simulate(self.config.latency().mutate).await;
        let mut collections = self.collections.lock().await;
        collections.patients.update_with(id, |patient| {
            patch.apply(patient);
            patient.updated_at = Utc::now();
        })
    }

    pub async fn delete_patient(&self, id: &RecordId) -> bool {
        self.simulate(self.config.latency().remove).await;
        self.collections.lock().await.patients.remove(id)
    }

    // ========================================================================
    // Doctors
    // ========================================================================

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.simulate(self.config.latency().list).await;
        self.collections.lock().await.doctors.list()
    }

    pub async fn get_doctor(&self, id: &RecordId) -> Option<Doctor> {
        self.simulate(self.config.latency().fetch).await;
        self.collections.lock().await.doctors.get(id).cloned()
    }

    pub async fn create_doctor(&self, draft: DoctorDraft) -> Doctor {
        self.simulate(self.config.latency().mutate).await;
        let doctor = draft.into_doctor(RecordId::new(), Utc::now());
        let mut collections = self.collections.lock().await;
        collections.doctors.insert(doctor.clone());
        doctor
    }

    pub async fn update_doctor(&self, id: &RecordId, patch: DoctorPatch) -> Option<Doctor> {
        self.simulate(self.config.latency().mutate).await;
        let mut collections = self.collections.lock().await;
        collections.doctors.update_with(id, |doctor| patch.apply(doctor))
    }

    pub async fn delete_doctor(&self, id: &RecordId) -> bool {
        self.simulate(self.config.latency().remove).await;
        self.collections.lock().await.doctors.remove(id)
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    pub async fn list_appointments(&self) -> Vec<Appointment> {
        self.simulate(self.config.latency().list).await;
        self.collections.lock().await.appointments.list()
    }

    pub async fn get_appointment(&self, id: &RecordId) -> Option<Appointment> {
        self.simulate(self.config.latency().fetch).await;
        self.collections.lock().await.appointments.get(id).cloned()
    }

    /// Creates an appointment. Neither the patient nor the doctor reference
    /// is checked for existence, and double booking is not rejected.
    pub async fn create_appointment(&self, draft: AppointmentDraft) -> Appointment {
        self.simulate(self.config.latency().mutate).await;
        let appointment = draft.into_appointment(RecordId::new(), Utc::now());
        let mut collections = self.collections.lock().await;
        collections.appointments.insert(appointment.clone());
        appointment
    }

    pub async fn update_appointment(
        &self,
        id: &RecordId,
        patch: AppointmentPatch,
    ) -> Option<Appointment> {
        self.simulate(self.config.latency().mutate).await;
        let mut collections = self.collections.lock().await;
        collections
            .appointments
            .update_with(id, |appointment| patch.apply(appointment))
    }

    pub async fn delete_appointment(&self, id: &RecordId) -> bool {
        self.simulate(self.config.latency().remove).await;
        self.collections.lock().await.appointments.remove(id)
    }

    // ========================================================================
    // Medical records
    // ========================================================================

    pub async fn list_medical_records(&self) -> Vec<MedicalRecord> {
        self.simulate(self.config.latency().list).await;
        self.collections.lock().await.medical_records.list()
    }

    pub async fn get_medical_record(&self, id: &RecordId) -> Option<MedicalRecord> {
        self.simulate(self.config.latency().fetch).await;
        self.collections
            .lock()
            .await
            .medical_records
            .get(id)
            .cloned()
    }

    pub async fn create_medical_record(&self, draft: MedicalRecordDraft) -> MedicalRecord {
        self.simulate(self.config.latency().mutate).await;
        let record = draft.into_record(RecordId::new(), Utc::now());
        let mut collections = self.collections.lock().await;
        collections.medical_records.insert(record.clone());
        record
    }

    pub async fn update_medical_record(
        &self,
        id: &RecordId,
        patch: MedicalRecordPatch,
    ) -> Option<MedicalRecord> {
        self.simulate(self.config.latency().mutate).await;
        let mut collections = self.collections.lock().await;
        collections
            .medical_records
            .update_with(id, |record| patch.apply(record))
    }

    pub async fn delete_medical_record(&self, id: &RecordId) -> bool {
        self.simulate(self.config.latency().remove).await;
        self.collections.lock().await.medical_records.remove(id)
    }

    // ========================================================================
    // Bills
    // ========================================================================

    pub async fn list_bills(&self) -> Vec<Bill> {
        self.simulate(self.config.latency().list).await;
        self.collections.lock().await.bills.list()
    }

    pub async fn get_bill(&self, id: &RecordId) -> Option<Bill> {
        self.simulate(self.config.latency().fetch).await;
        self.collections.lock().await.bills.get(id).cloned()
    }

    pub async fn create_bill(&self, draft: BillDraft) -> Bill {
        self.simulate(self.config.latency().mutate).await;
        let bill = draft.into_bill(RecordId::new(), Utc::now());
        let mut collections = self.collections.lock().await;
        collections.bills.insert(bill.clone());
        bill
    }

    pub async fn update_bill(&self, id: &RecordId, patch: BillPatch) -> Option<Bill> {
        self.simulate(self.config.latency().mutate).await;
        let mut collections = self.collections.lock().await;
        collections.bills.update_with(id, |bill| patch.apply(bill))
    }

    pub async fn delete_bill(&self, id: &RecordId) -> bool {
        self.simulate(self.config.latency().remove).await;
        self.collections.lock().await.bills.remove(id)
    }
}
