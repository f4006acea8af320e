use serde::{Deserialize, Serialize};

use super::enums::EmergencyStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emergency {
    pub id: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub status: EmergencyStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEmergency {
    #[serde(default)]
    pub description: String,
}
