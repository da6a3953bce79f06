//! Dashboard statistics shapes.
//!
//! These are derived values, computed by the data service from the current
//! collections on every request; nothing here is ever stored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Appointment count for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyAppointments {
    /// Three-letter month label, e.g. `"Jan"`.
    pub month: String,
    pub appointments: u64,
}

/// The aggregate numbers shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: u64,
    pub total_doctors: u64,
    /// Appointments dated today, regardless of status.
    pub today_appointments: u64,
    /// Bills currently in the pending state.
    pub pending_bills: u64,
    /// Sum of amounts over paid bills.
    pub total_revenue: f64,
    /// Percentage of patients whose record was created this calendar month.
    pub patient_growth: f64,
    /// Appointment counts per month of the current year, in month order.
    pub appointment_trends: Vec<MonthlyAppointments>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_with_contract_field_names() {
        let stats = DashboardStats {
            total_patients: 245,
            total_doctors: 12,
            today_appointments: 18,
            pending_bills: 32,
            total_revenue: 125000.0,
            patient_growth: 8.5,
            appointment_trends: vec![MonthlyAppointments {
                month: "Jan".into(),
                appointments: 120,
            }],
        };

        let json = serde_json::to_value(&stats).expect("serialize");
        assert_eq!(json["totalPatients"], 245);
        assert_eq!(json["pendingBills"], 32);
        assert_eq!(json["totalRevenue"], 125000.0);
        assert_eq!(json["appointmentTrends"][0]["month"], "Jan");
    }
}
