use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ApiError, HealthService, HealthStatus, LoginRequest, LoginResponse};
use hms_core::{
    CoreConfig, FileTokenStore, HospitalService, LatencyProfile, SessionStore,
};
use hms_domain::{
    Appointment, AppointmentDraft, AppointmentPatch, AppointmentStatus, AppointmentType, Bill,
    BillDraft, BillPatch, BillStatus, DashboardStats, Doctor, DoctorDraft, DoctorPatch,
    EmergencyContact, Gender, MedicalRecord, MedicalRecordDraft, MedicalRecordPatch, Medication,
    MonthlyAppointments, Patient, PatientDraft, PatientPatch, ScheduleSlot, User, UserRole,
};
use hms_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application state shared across REST handlers.
///
/// Holds the data-service handle and the session store; both are cheap
/// clones over shared interior state.
#[derive(Clone)]
struct AppState {
    service: HospitalService,
    session: SessionStore,
}

/// Response body for delete endpoints.
///
/// Deleting an absent record is not an error: the body reports
/// `deleted: false` with a 200, matching the core's contract.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
struct DeleteResponse {
    deleted: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        login,
        logout,
        current_session,
        dashboard_stats,
        list_patients,
        get_patient,
        create_patient,
        update_patient,
        delete_patient,
        list_doctors,
        get_doctor,
        create_doctor,
        update_doctor,
        delete_doctor,
        list_appointments,
        get_appointment,
        create_appointment,
        update_appointment,
        delete_appointment,
        list_medical_records,
        get_medical_record,
        create_medical_record,
        update_medical_record,
        delete_medical_record,
        list_bills,
        get_bill,
        create_bill,
        update_bill,
        delete_bill,
    ),
    components(schemas(
        HealthStatus,
        LoginRequest,
        LoginResponse,
        DeleteResponse,
        DashboardStats,
        MonthlyAppointments,
        User,
        UserRole,
        Patient,
        PatientDraft,
        PatientPatch,
        EmergencyContact,
        Gender,
        Doctor,
        DoctorDraft,
        DoctorPatch,
        ScheduleSlot,
        Appointment,
        AppointmentDraft,
        AppointmentPatch,
        AppointmentStatus,
        AppointmentType,
        MedicalRecord,
        MedicalRecordDraft,
        MedicalRecordPatch,
        Medication,
        Bill,
        BillDraft,
        BillPatch,
        BillStatus,
    ))
)]
struct ApiDoc;

/// Main entry point for the HMS application.
///
/// Starts the REST server with Swagger documentation at `/swagger-ui`.
///
/// # Environment Variables
/// - `HMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HMS_SESSION_DIR`: directory for the durable session-token slot
///   (default: ".hms-session")
/// - `HMS_SIMULATED_LATENCY`: set to `0` to disable the simulated per-call
///   delays (default: on, mimicking a remote backend)
/// - `HMS_DEMO_DATA`: set to `0` to start with empty collections
///   (default: seeded demonstration data)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("hms=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("HMS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let session_dir = std::env::var("HMS_SESSION_DIR").unwrap_or_else(|_| ".hms-session".into());

    let latency = match std::env::var("HMS_SIMULATED_LATENCY").as_deref() {
        Ok("0") | Ok("off") | Ok("false") => LatencyProfile::zero(),
        _ => LatencyProfile::default(),
    };
    let seed_demo = !matches!(
        std::env::var("HMS_DEMO_DATA").as_deref(),
        Ok("0") | Ok("off") | Ok("false")
    );

    let config = CoreConfig::new(latency);
    let service = if seed_demo {
        HospitalService::with_demo_data(config)
    } else {
        HospitalService::new(config)
    };
    let session = SessionStore::new(
        service.clone(),
        Arc::new(FileTokenStore::new(&session_dir)),
    );

    tracing::info!("++ Starting HMS REST on {}", rest_addr);
    if session.current_user().is_some() {
        tracing::info!("++ Restored an authenticated session from {}", session_dir);
    }

    let app = router(AppState { service, session });
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the REST router over the given state.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(current_session))
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route(
            "/api/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/api/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/api/doctors/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
        .route(
            "/api/medical-records",
            get(list_medical_records).post(create_medical_record),
        )
        .route(
            "/api/medical-records/:id",
            get(get_medical_record)
                .put(update_medical_record)
                .delete(delete_medical_record),
        )
        .route("/api/bills", get(list_bills).post(create_bill))
        .route(
            "/api/bills/:id",
            get(get_bill).put(update_bill).delete(delete_bill),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parses a path segment into a canonical record id.
fn parse_id(raw: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(raw).map_err(|e| ApiError::InvalidInput(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health check response", body = HealthStatus))
)]
/// Health check endpoint.
///
/// Used for monitoring and load balancer health checks; carries no
/// application state.
async fn health(State(_state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthService::check_health())
}

// ============================================================================
// Authentication
// ============================================================================

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Credentials rejected")
    )
)]
/// Signs in and persists the session token.
///
/// With the current mock credential check this always succeeds; the 401 path
/// is part of the contract for when real verification lands.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.session.login(req.username.as_str(), &req.password).await?;
    Ok(Json(LoginResponse { user }))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Signed out"))
)]
/// Signs out. Always succeeds.
async fn logout(State(state): State<AppState>) -> StatusCode {
    state.session.logout().await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current identity", body = LoginResponse),
        (status = 401, description = "No session")
    )
)]
/// Returns the currently signed-in user, if any.
async fn current_session(
    State(state): State<AppState>,
) -> Result<Json<LoginResponse>, (StatusCode, &'static str)> {
    match state.session.current_user() {
        Some(user) => Ok(Json(LoginResponse { user })),
        None => Err((StatusCode::UNAUTHORIZED, "not signed in")),
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses((status = 200, description = "Aggregated dashboard numbers", body = DashboardStats))
)]
/// Aggregates dashboard statistics from the current collections.
async fn dashboard_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.service.dashboard_stats().await)
}

// ============================================================================
// Patients
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/patients",
    responses((status = 200, description = "All patients in insertion order", body = [Patient]))
)]
/// Lists all patients.
async fn list_patients(State(state): State<AppState>) -> Json<Vec<Patient>> {
    Json(state.service.list_patients().await)
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 404, description = "Unknown id")
    )
)]
/// Fetches one patient by id.
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .get_patient(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("patient {id}")))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = PatientDraft,
    responses((status = 201, description = "Patient created", body = Patient))
)]
/// Creates a patient.
async fn create_patient(
    State(state): State<AppState>,
    Json(draft): Json<PatientDraft>,
) -> (StatusCode, Json<Patient>) {
    let patient = state.service.create_patient(draft).await;
    (StatusCode::CREATED, Json(patient))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = PatientPatch,
    responses(
        (status = 200, description = "Updated patient", body = Patient),
        (status = 404, description = "Unknown id")
    )
)]
/// Applies a partial update to a patient.
async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PatientPatch>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .update_patient(&id, patch)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("patient {id}")))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses((status = 200, description = "Whether a record was removed", body = DeleteResponse))
)]
/// Deletes a patient. Appointments and bills referring to it are untouched.
async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.service.delete_patient(&id).await;
    Ok(Json(DeleteResponse { deleted }))
}

// ============================================================================
// Doctors
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/doctors",
    responses((status = 200, description = "All doctors in insertion order", body = [Doctor]))
)]
/// Lists all doctors.
async fn list_doctors(State(state): State<AppState>) -> Json<Vec<Doctor>> {
    Json(state.service.list_doctors().await)
}

#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "The doctor", body = Doctor),
        (status = 404, description = "Unknown id")
    )
)]
/// Fetches one doctor by id.
async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .get_doctor(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("doctor {id}")))
}

#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = DoctorDraft,
    responses((status = 201, description = "Doctor created", body = Doctor))
)]
/// Creates a doctor.
async fn create_doctor(
    State(state): State<AppState>,
    Json(draft): Json<DoctorDraft>,
) -> (StatusCode, Json<Doctor>) {
    let doctor = state.service.create_doctor(draft).await;
    (StatusCode::CREATED, Json(doctor))
}

#[utoipa::path(
    put,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    request_body = DoctorPatch,
    responses(
        (status = 200, description = "Updated doctor", body = Doctor),
        (status = 404, description = "Unknown id")
    )
)]
/// Applies a partial update to a doctor.
async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DoctorPatch>,
) -> Result<Json<Doctor>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .update_doctor(&id, patch)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("doctor {id}")))
}

#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    responses((status = 200, description = "Whether a record was removed", body = DeleteResponse))
)]
/// Deletes a doctor.
async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.service.delete_doctor(&id).await;
    Ok(Json(DeleteResponse { deleted }))
}

// ============================================================================
// Appointments
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/appointments",
    responses((status = 200, description = "All appointments in insertion order", body = [Appointment]))
)]
/// Lists all appointments.
async fn list_appointments(State(state): State<AppState>) -> Json<Vec<Appointment>> {
    Json(state.service.list_appointments().await)
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 404, description = "Unknown id")
    )
)]
/// Fetches one appointment by id.
async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .get_appointment(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("appointment {id}")))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = AppointmentDraft,
    responses((status = 201, description = "Appointment created", body = Appointment))
)]
/// Creates an appointment. Patient and doctor references are not checked for
/// existence, and double booking is not rejected.
async fn create_appointment(
    State(state): State<AppState>,
    Json(draft): Json<AppointmentDraft>,
) -> (StatusCode, Json<Appointment>) {
    let appointment = state.service.create_appointment(draft).await;
    (StatusCode::CREATED, Json(appointment))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = AppointmentPatch,
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 404, description = "Unknown id")
    )
)]
/// Applies a partial update to an appointment.
async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .update_appointment(&id, patch)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("appointment {id}")))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses((status = 200, description = "Whether a record was removed", body = DeleteResponse))
)]
/// Deletes an appointment.
async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.service.delete_appointment(&id).await;
    Ok(Json(DeleteResponse { deleted }))
}

// ============================================================================
// Medical records
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/medical-records",
    responses((status = 200, description = "All medical records in insertion order", body = [MedicalRecord]))
)]
/// Lists all medical records.
async fn list_medical_records(State(state): State<AppState>) -> Json<Vec<MedicalRecord>> {
    Json(state.service.list_medical_records().await)
}

#[utoipa::path(
    get,
    path = "/api/medical-records/{id}",
    params(("id" = String, Path, description = "Medical record id")),
    responses(
        (status = 200, description = "The medical record", body = MedicalRecord),
        (status = 404, description = "Unknown id")
    )
)]
/// Fetches one medical record by id.
async fn get_medical_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MedicalRecord>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .get_medical_record(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("medical record {id}")))
}

#[utoipa::path(
    post,
    path = "/api/medical-records",
    request_body = MedicalRecordDraft,
    responses((status = 201, description = "Medical record created", body = MedicalRecord))
)]
/// Creates a medical record.
async fn create_medical_record(
    State(state): State<AppState>,
    Json(draft): Json<MedicalRecordDraft>,
) -> (StatusCode, Json<MedicalRecord>) {
    let record = state.service.create_medical_record(draft).await;
    (StatusCode::CREATED, Json(record))
}

#[utoipa::path(
    put,
    path = "/api/medical-records/{id}",
    params(("id" = String, Path, description = "Medical record id")),
    request_body = MedicalRecordPatch,
    responses(
        (status = 200, description = "Updated medical record", body = MedicalRecord),
        (status = 404, description = "Unknown id")
    )
)]
/// Applies a partial update to a medical record.
async fn update_medical_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MedicalRecordPatch>,
) -> Result<Json<MedicalRecord>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .update_medical_record(&id, patch)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("medical record {id}")))
}

#[utoipa::path(
    delete,
    path = "/api/medical-records/{id}",
    params(("id" = String, Path, description = "Medical record id")),
    responses((status = 200, description = "Whether a record was removed", body = DeleteResponse))
)]
/// Deletes a medical record.
async fn delete_medical_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.service.delete_medical_record(&id).await;
    Ok(Json(DeleteResponse { deleted }))
}

// ============================================================================
// Bills
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/bills",
    responses((status = 200, description = "All bills in insertion order", body = [Bill]))
)]
/// Lists all bills.
async fn list_bills(State(state): State<AppState>) -> Json<Vec<Bill>> {
    Json(state.service.list_bills().await)
}

#[utoipa::path(
    get,
    path = "/api/bills/{id}",
    params(("id" = String, Path, description = "Bill id")),
    responses(
        (status = 200, description = "The bill", body = Bill),
        (status = 404, description = "Unknown id")
    )
)]
/// Fetches one bill by id.
async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bill>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .get_bill(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("bill {id}")))
}

#[utoipa::path(
    post,
    path = "/api/bills",
    request_body = BillDraft,
    responses((status = 201, description = "Bill created", body = Bill))
)]
/// Creates a bill.
async fn create_bill(
    State(state): State<AppState>,
    Json(draft): Json<BillDraft>,
) -> (StatusCode, Json<Bill>) {
    let bill = state.service.create_bill(draft).await;
    (StatusCode::CREATED, Json(bill))
}

#[utoipa::path(
    put,
    path = "/api/bills/{id}",
    params(("id" = String, Path, description = "Bill id")),
    request_body = BillPatch,
    responses(
        (status = 200, description = "Updated bill", body = Bill),
        (status = 404, description = "Unknown id")
    )
)]
/// Applies a partial update to a bill.
async fn update_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BillPatch>,
) -> Result<Json<Bill>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .update_bill(&id, patch)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("bill {id}")))
}

#[utoipa::path(
    delete,
    path = "/api/bills/{id}",
    params(("id" = String, Path, description = "Bill id")),
    responses((status = 200, description = "Whether a record was removed", body = DeleteResponse))
)]
/// Deletes a bill.
async fn delete_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.service.delete_bill(&id).await;
    Ok(Json(DeleteResponse { deleted }))
}
