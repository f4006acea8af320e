use serde::{Deserialize, Serialize};

use super::enums::AppointmentType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    /// Requested appointment date and time, as entered.
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub date: String,
    pub time: String,
    pub appointment_type: AppointmentType,
}
