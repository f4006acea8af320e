use serde::{Deserialize, Serialize};

/// A medication reminder. The only record type that can be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub medication: String,
    /// Time of day the user asked to be reminded, as entered.
    pub time: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReminder {
    #[serde(default)]
    pub medication: String,
    #[serde(default)]
    pub time: String,
}
