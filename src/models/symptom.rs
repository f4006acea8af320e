use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub symptom: String,
    pub duration: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSymptom {
    #[serde(default)]
    pub symptom: String,
    #[serde(default)]
    pub duration: String,
}
