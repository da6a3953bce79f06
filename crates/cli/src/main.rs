use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hms_core::{
    CoreConfig, FileTokenStore, HospitalService, SessionStore,
};
use hms_domain::{EmergencyContact, Gender, PatientDraft};
use hms_types::NonEmptyText;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "HMS hospital management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    ListPatients,
    /// List all doctors
    ListDoctors,
    /// List all appointments
    ListAppointments,
    /// Register a new patient
    AddPatient {
        /// First name
        first_name: NonEmptyText,
        /// Last name
        last_name: NonEmptyText,
        /// Email address
        email: NonEmptyText,
        /// Phone number
        phone: NonEmptyText,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: NaiveDate,
        /// Gender (male, female or other)
        #[arg(long)]
        gender: Gender,
        /// Home address
        #[arg(long)]
        address: NonEmptyText,
        /// Blood type, e.g. O-
        #[arg(long)]
        blood_type: NonEmptyText,
        /// Emergency contact name
        #[arg(long)]
        contact_name: NonEmptyText,
        /// Emergency contact phone
        #[arg(long)]
        contact_phone: NonEmptyText,
        /// Emergency contact relationship
        #[arg(long)]
        contact_relationship: NonEmptyText,
        /// Insurance identifier (optional)
        #[arg(long)]
        insurance_id: Option<String>,
    },
    /// Show dashboard statistics
    Stats,
    /// Sign in (mock credentials; any username and password are accepted)
    Login {
        /// Username
        username: NonEmptyText,
        /// Password
        password: String,
    },
    /// Sign out and clear the stored session token
    Logout,
    /// Show the currently signed-in user, if any
    Whoami,
}

/// The directory holding the durable session-token slot, shared with the
/// REST server so sessions survive across both front-ends.
fn session_dir() -> String {
    std::env::var("HMS_SESSION_DIR").unwrap_or_else(|_| ".hms-session".into())
}

fn session_store(service: &HospitalService) -> SessionStore {
    SessionStore::new(
        service.clone(),
        Arc::new(FileTokenStore::new(session_dir())),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The CLI runs against an in-process service seeded with demonstration
    // data; latency simulation is pointless at a prompt, so it is off.
    let service = HospitalService::with_demo_data(CoreConfig::instant());

    match cli.command {
        Some(Commands::ListPatients) => {
            let patients = service.list_patients().await;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, Name: {} {}, Blood type: {}, Registered: {}",
                        patient.id,
                        patient.first_name,
                        patient.last_name,
                        patient.blood_type,
                        patient.created_at.format("%Y-%m-%d"),
                    );
                }
            }
        }
        Some(Commands::ListDoctors) => {
            let doctors = service.list_doctors().await;
            if doctors.is_empty() {
                println!("No doctors found.");
            } else {
                for doctor in doctors {
                    println!(
                        "ID: {}, Name: {} {}, Specialisation: {}, Active: {}",
                        doctor.id,
                        doctor.first_name,
                        doctor.last_name,
                        doctor.specialization,
                        doctor.is_active,
                    );
                }
            }
        }
        Some(Commands::ListAppointments) => {
            let appointments = service.list_appointments().await;
            if appointments.is_empty() {
                println!("No appointments found.");
            } else {
                for appointment in appointments {
                    println!(
                        "ID: {}, Patient: {}, Doctor: {}, When: {} {}, Status: {}, Type: {}",
                        appointment.id,
                        appointment.patient_id,
                        appointment.doctor_id,
                        appointment.date,
                        appointment.time,
                        appointment.status,
                        appointment.kind,
                    );
                }
            }
        }
        Some(Commands::AddPatient {
            first_name,
            last_name,
            email,
            phone,
            date_of_birth,
            gender,
            address,
            blood_type,
            contact_name,
            contact_phone,
            contact_relationship,
            insurance_id,
        }) => {
            let draft = PatientDraft {
                first_name: first_name.into_string(),
                last_name: last_name.into_string(),
                email: email.into_string(),
                phone: phone.into_string(),
                date_of_birth,
                gender,
                address: address.into_string(),
                blood_type: blood_type.into_string(),
                emergency_contact: EmergencyContact {
                    name: contact_name.into_string(),
                    phone: contact_phone.into_string(),
                    relationship: contact_relationship.into_string(),
                },
                insurance_id,
                medical_history: vec![],
            };

            let patient = service.create_patient(draft).await;
            println!(
                "Registered patient {} {} with ID {}",
                patient.first_name, patient.last_name, patient.id
            );
        }
        Some(Commands::Stats) => {
            let stats = service.dashboard_stats().await;
            println!("Patients:            {}", stats.total_patients);
            println!("Doctors:             {}", stats.total_doctors);
            println!("Appointments today:  {}", stats.today_appointments);
            println!("Pending bills:       {}", stats.pending_bills);
            println!("Total revenue:       {:.2}", stats.total_revenue);
            println!("Patient growth:      {:.1}%", stats.patient_growth);
            for trend in stats.appointment_trends {
                println!("  {}: {} appointments", trend.month, trend.appointments);
            }
        }
        Some(Commands::Login { username, password }) => {
            let session = session_store(&service);
            let user = session.login(username.as_str(), &password).await?;
            println!("Signed in as {} ({})", user.full_name(), user.role);
        }
        Some(Commands::Logout) => {
            let session = session_store(&service);
            session.logout().await;
            println!("Signed out.");
        }
        Some(Commands::Whoami) => {
            // Resolved from the durable token slot at construction; no
            // backend call happens here.
            let session = session_store(&service);
            match session.current_user() {
                Some(user) => println!("Signed in as {} ({})", user.full_name(), user.role),
                None => println!("Not signed in."),
            }
        }
        None => {
            println!("No command given. Try `hms --help`.");
        }
    }

    Ok(())
}
