use serde::{Deserialize, Serialize};

/// A confirmed medication intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationLog {
    pub id: String,
    pub medication: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMedicationLog {
    #[serde(default)]
    pub medication: String,
}
