//! Hardcoded demonstration data for the binaries.
//!
//! All data in this module is fictional. Dates are derived from the current
//! clock so that a freshly started demo shows live-looking dashboard numbers
//! (appointments today, bills due soon) instead of a stale snapshot.

use crate::store::Collections;
use chrono::{Duration, Utc};
use hms_domain::{
    AppointmentDraft, AppointmentStatus, AppointmentType, BillDraft, BillStatus, DoctorDraft,
    EmergencyContact, Gender, MedicalRecordDraft, Medication, PatientDraft, ScheduleSlot,
};
use hms_types::{ClockTime, Money};
use hms_uuid::RecordId;

fn clock(hour: u8, minute: u8) -> ClockTime {
    ClockTime::new(hour, minute).expect("demo clock time literal is valid")
}

fn money(amount: f64) -> Money {
    Money::new(amount).expect("demo amount literal is valid")
}

fn weekday_slots(start: ClockTime, end: ClockTime) -> Vec<ScheduleSlot> {
    (1..=5)
        .map(|day_of_week| ScheduleSlot {
            day_of_week,
            start_time: start,
            end_time: end,
            is_available: true,
        })
        .collect()
}

/// Builds the demonstration collections.
pub(crate) fn collections() -> Collections {
    let now = Utc::now();
    let today = now.date_naive();
    let mut collections = Collections::default();

    // -- Patients ------------------------------------------------------------

    let rosa = PatientDraft {
        first_name: "Rosa".into(),
        last_name: "Martinez".into(),
        email: "rosa.martinez@example.com".into(),
        phone: "+44 20 7946 0102".into(),
        date_of_birth: today - Duration::days(365 * 34),
        gender: Gender::Female,
        address: "4 Clarence Road, Bristol".into(),
        blood_type: "A+".into(),
        emergency_contact: EmergencyContact {
            name: "Miguel Martinez".into(),
            phone: "+44 20 7946 0103".into(),
            relationship: "Spouse".into(),
        },
        insurance_id: Some("INS001234".into()),
        medical_history: vec![],
    }
    .into_patient(RecordId::new(), now - Duration::days(40));

    let errol = PatientDraft {
        first_name: "Errol".into(),
        last_name: "Campbell".into(),
        email: "errol.campbell@example.com".into(),
        phone: "+44 113 496 0201".into(),
        date_of_birth: today - Duration::days(365 * 58),
        gender: Gender::Male,
        address: "19 Roundhay Park Lane, Leeds".into(),
        blood_type: "B-".into(),
        emergency_contact: EmergencyContact {
            name: "Dionne Campbell".into(),
            phone: "+44 113 496 0202".into(),
            relationship: "Daughter".into(),
        },
        insurance_id: None,
        medical_history: vec![],
    }
    .into_patient(RecordId::new(), now - Duration::days(3));

    // -- Doctors -------------------------------------------------------------

    let dr_khan = DoctorDraft {
        first_name: "Aisha".into(),
        last_name: "Khan".into(),
        email: "aisha.khan@hospital.example".into(),
        phone: "+44 161 496 0301".into(),
        specialization: "Cardiology".into(),
        experience: 12,
        education: "MB ChB, University of Manchester".into(),
        license_number: "GMC1234567".into(),
        schedule: weekday_slots(clock(9, 0), clock(17, 0)),
        is_active: true,
    }
    .into_doctor(RecordId::new(), now - Duration::days(400));

    let dr_okafor = DoctorDraft {
        first_name: "Chinedu".into(),
        last_name: "Okafor".into(),
        email: "chinedu.okafor@hospital.example".into(),
        phone: "+44 161 496 0302".into(),
        specialization: "Orthopaedics".into(),
        experience: 8,
        education: "MB BS, King's College London".into(),
        license_number: "GMC7654321".into(),
        schedule: weekday_slots(clock(8, 0), clock(16, 0)),
        is_active: true,
    }
    .into_doctor(RecordId::new(), now - Duration::days(250));

    // -- Appointments --------------------------------------------------------

    let checkup = AppointmentDraft {
        patient_id: rosa.id.clone(),
        doctor_id: dr_khan.id.clone(),
        date: today,
        time: clock(10, 0),
        duration: 30,
        status: AppointmentStatus::Scheduled,
        kind: AppointmentType::Consultation,
        notes: Some("Regular checkup".into()),
    }
    .into_appointment(RecordId::new(), now - Duration::days(5));

    let knee_review = AppointmentDraft {
        patient_id: errol.id.clone(),
        doctor_id: dr_okafor.id.clone(),
        date: today + Duration::days(1),
        time: clock(14, 0),
        duration: 45,
        status: AppointmentStatus::Scheduled,
        kind: AppointmentType::FollowUp,
        notes: Some("Knee pain reassessment".into()),
    }
    .into_appointment(RecordId::new(), now - Duration::days(2));

    // -- Medical records -----------------------------------------------------

    let hypertension = MedicalRecordDraft {
        patient_id: rosa.id.clone(),
        doctor_id: dr_khan.id.clone(),
        date: today - Duration::days(40),
        diagnosis: "Hypertension".into(),
        symptoms: "Recurrent headaches, elevated blood pressure".into(),
        treatment: "Lifestyle changes and medication".into(),
        medications: vec![Medication {
            name: "Amlodipine".into(),
            dosage: "5mg".into(),
            frequency: "Once daily".into(),
            duration: "3 months".into(),
            instructions: Some("Take in the morning".into()),
        }],
        notes: Some("Advised to reduce salt intake and monitor BP weekly.".into()),
        attachments: None,
    }
    .into_record(RecordId::new(), now - Duration::days(40));

    // -- Bills ---------------------------------------------------------------

    let consultation_bill = BillDraft {
        patient_id: rosa.id.clone(),
        appointment_id: Some(checkup.id.clone()),
        amount: money(250.0),
        description: "Consultation - Cardiology".into(),
        status: BillStatus::Pending,
        due_date: today + Duration::days(30),
        paid_date: None,
    }
    .into_bill(RecordId::new(), now - Duration::days(1));

    let physio_bill = BillDraft {
        patient_id: errol.id.clone(),
        appointment_id: Some(knee_review.id.clone()),
        amount: money(300.0),
        description: "Consultation - Orthopaedics".into(),
        status: BillStatus::Paid,
        due_date: today + Duration::days(14),
        paid_date: Some(now - Duration::days(1)),
    }
    .into_bill(RecordId::new(), now - Duration::days(2));

    // Link the record into the patient's history the way a view would.
    let mut rosa = rosa;
    rosa.medical_history.push(hypertension.id.clone());

    collections.patients.insert(rosa);
    collections.patients.insert(errol);
    collections.doctors.insert(dr_khan);
    collections.doctors.insert(dr_okafor);
    collections.appointments.insert(checkup);
    collections.appointments.insert(knee_review);
    collections.medical_records.insert(hypertension);
    collections.bills.insert(consultation_bill);
    collections.bills.insert(physio_bill);

    collections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_references_resolve_within_the_data_set() {
        let collections = collections();

        for appointment in collections.appointments.list() {
            assert!(collections.patients.get(&appointment.patient_id).is_some());
            assert!(collections.doctors.get(&appointment.doctor_id).is_some());
        }
        for bill in collections.bills.list() {
            assert!(collections.patients.get(&bill.patient_id).is_some());
        }
    }

    #[test]
    fn demo_has_an_appointment_today_and_a_pending_bill() {
        let collections = collections();
        let today = Utc::now().date_naive();

        assert!(collections
            .appointments
            .iter()
            .any(|a| a.date == today));
        assert!(collections
            .bills
            .iter()
            .any(|b| b.status == BillStatus::Pending));
    }
}
