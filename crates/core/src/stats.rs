//! Dashboard aggregation.
//!
//! Pure functions over a snapshot of the collections; the service calls
//! [`compute`] under the store lock so the numbers are mutually consistent.

use crate::store::Collections;
use chrono::{Datelike, NaiveDate};
use hms_domain::{BillStatus, DashboardStats, MonthlyAppointments};
use hms_types::Money;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Computes the dashboard numbers as of `today`.
pub(crate) fn compute(collections: &Collections, today: NaiveDate) -> DashboardStats {
    let total_patients = collections.patients.len() as u64;
    let total_doctors = collections.doctors.len() as u64;

    let today_appointments = collections
        .appointments
        .iter()
        .filter(|a| a.date == today)
        .count() as u64;

    let pending_bills = collections
        .bills
        .iter()
        .filter(|b| b.status == BillStatus::Pending)
        .count() as u64;

    let total_revenue = collections
        .bills
        .iter()
        .filter(|b| b.status == BillStatus::Paid)
        .fold(Money::zero(), |sum, b| sum.add(b.amount))
        .amount();

    // Share of the patient base registered this calendar month.
    let new_this_month = collections
        .patients
        .iter()
        .filter(|p| {
            let created = p.created_at.date_naive();
            created.year() == today.year() && created.month() == today.month()
        })
        .count();
    let patient_growth = if total_patients == 0 {
        0.0
    } else {
        new_this_month as f64 / total_patients as f64 * 100.0
    };

    let appointment_trends = monthly_trend(collections, today);

    DashboardStats {
        total_patients,
        total_doctors,
        today_appointments,
        pending_bills,
        total_revenue,
        patient_growth,
        appointment_trends,
    }
}

/// Appointment counts for January through the current month of `today`'s
/// year, in month order.
fn monthly_trend(collections: &Collections, today: NaiveDate) -> Vec<MonthlyAppointments> {
    let mut counts = [0u64; 12];
    for appointment in collections.appointments.iter() {
        if appointment.date.year() == today.year() {
            counts[appointment.date.month0() as usize] += 1;
        }
    }

    counts
        .iter()
        .take(today.month() as usize)
        .enumerate()
        .map(|(month0, &appointments)| MonthlyAppointments {
            month: MONTH_LABELS[month0].to_owned(),
            appointments,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hms_domain::{
        AppointmentDraft, AppointmentStatus, AppointmentType, BillDraft, EmergencyContact, Gender,
        PatientDraft,
    };
    use hms_types::ClockTime;
    use hms_uuid::RecordId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn appointment_on(day: NaiveDate) -> hms_domain::Appointment {
        AppointmentDraft {
            patient_id: RecordId::new(),
            doctor_id: RecordId::new(),
            date: day,
            time: ClockTime::new(10, 0).expect("valid time"),
            duration: 30,
            status: AppointmentStatus::Scheduled,
            kind: AppointmentType::Consultation,
            notes: None,
        }
        .into_appointment(RecordId::new(), Utc::now())
    }

    fn bill_with(status: BillStatus, amount: f64) -> hms_domain::Bill {
        BillDraft {
            patient_id: RecordId::new(),
            appointment_id: None,
            amount: Money::new(amount).expect("valid amount"),
            description: "Consultation".into(),
            status,
            due_date: date(2024, 2, 20),
            paid_date: None,
        }
        .into_bill(RecordId::new(), Utc::now())
    }

    fn patient_created_at(at: chrono::DateTime<Utc>) -> hms_domain::Patient {
        PatientDraft {
            first_name: "Sam".into(),
            last_name: "Patient".into(),
            email: "sam@example.com".into(),
            phone: "000".into(),
            date_of_birth: date(1990, 1, 1),
            gender: Gender::Other,
            address: "1 Test Way".into(),
            blood_type: "O+".into(),
            emergency_contact: EmergencyContact {
                name: "Next Of Kin".into(),
                phone: "001".into(),
                relationship: "Friend".into(),
            },
            insurance_id: None,
            medical_history: vec![],
        }
        .into_patient(RecordId::new(), at)
    }

    #[test]
    fn counts_pending_bills_and_sums_paid_revenue() {
        let mut collections = Collections::default();
        collections.bills.insert(bill_with(BillStatus::Pending, 100.0));
        collections.bills.insert(bill_with(BillStatus::Pending, 50.0));
        collections.bills.insert(bill_with(BillStatus::Paid, 300.0));
        collections.bills.insert(bill_with(BillStatus::Overdue, 75.0));
        collections.bills.insert(bill_with(BillStatus::Paid, 120.5));

        let stats = compute(&collections, date(2024, 2, 1));
        assert_eq!(stats.pending_bills, 2);
        assert_eq!(stats.total_revenue, 420.5);
    }

    #[test]
    fn today_appointments_counts_only_todays_date() {
        let today = date(2024, 1, 20);
        let mut collections = Collections::default();
        collections.appointments.insert(appointment_on(today));
        collections.appointments.insert(appointment_on(today));
        collections
            .appointments
            .insert(appointment_on(date(2024, 1, 21)));

        let stats = compute(&collections, today);
        assert_eq!(stats.today_appointments, 2);
    }

    #[test]
    fn trend_covers_january_through_current_month() {
        let mut collections = Collections::default();
        collections.appointments.insert(appointment_on(date(2024, 1, 5)));
        collections.appointments.insert(appointment_on(date(2024, 3, 9)));
        collections.appointments.insert(appointment_on(date(2024, 3, 12)));
        // Previous year must not leak into the trend.
        collections.appointments.insert(appointment_on(date(2023, 3, 1)));

        let stats = compute(&collections, date(2024, 4, 15));
        let months: Vec<&str> = stats
            .appointment_trends
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(months, ["Jan", "Feb", "Mar", "Apr"]);
        assert_eq!(stats.appointment_trends[0].appointments, 1);
        assert_eq!(stats.appointment_trends[1].appointments, 0);
        assert_eq!(stats.appointment_trends[2].appointments, 2);
    }

    #[test]
    fn patient_growth_is_share_of_patients_registered_this_month() {
        let today = date(2024, 6, 15);
        let mut collections = Collections::default();
        collections.patients.insert(patient_created_at(
            Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).single().expect("valid"),
        ));
        collections.patients.insert(patient_created_at(
            Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single().expect("valid"),
        ));
        collections.patients.insert(patient_created_at(
            Utc.with_ymd_and_hms(2023, 6, 2, 9, 0, 0).single().expect("valid"),
        ));

        let stats = compute(&collections, today);
        assert_eq!(stats.total_patients, 3);
        assert!((stats.patient_growth - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_collections_produce_all_zero_stats() {
        let stats = compute(&Collections::default(), date(2024, 1, 1));
        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.patient_growth, 0.0);
        assert_eq!(stats.appointment_trends.len(), 1);
        assert_eq!(stats.appointment_trends[0].appointments, 0);
    }
}
