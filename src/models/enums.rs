use serde::{Deserialize, Serialize};

/// Raised when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value:?}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(AppointmentType {
    GeneralCheckup => "General Checkup",
    FollowUpVisit => "Follow-up Visit",
    SpecialistConsultation => "Specialist Consultation",
    Vaccination => "Vaccination",
    LabTest => "Lab Test",
    Emergency => "Emergency",
});

// No code path moves an emergency out of `Pending`.
str_enum!(EmergencyStatus {
    Pending => "pending",
    Resolved => "resolved",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn appointment_type_round_trip() {
        for (variant, s) in [
            (AppointmentType::GeneralCheckup, "General Checkup"),
            (AppointmentType::FollowUpVisit, "Follow-up Visit"),
            (AppointmentType::SpecialistConsultation, "Specialist Consultation"),
            (AppointmentType::Vaccination, "Vaccination"),
            (AppointmentType::LabTest, "Lab Test"),
            (AppointmentType::Emergency, "Emergency"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AppointmentType::from_str(s).unwrap(), variant);
        }
        assert_eq!(AppointmentType::ALL.len(), 6);
    }

    #[test]
    fn appointment_type_serializes_as_label() {
        let json = serde_json::to_string(&AppointmentType::FollowUpVisit).unwrap();
        assert_eq!(json, "\"Follow-up Visit\"");
        let parsed: AppointmentType = serde_json::from_str("\"Lab Test\"").unwrap();
        assert_eq!(parsed, AppointmentType::LabTest);
    }

    #[test]
    fn emergency_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EmergencyStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(EmergencyStatus::Resolved.to_string(), "resolved");
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = AppointmentType::from_str("Dental").unwrap_err();
        assert_eq!(err.field, "AppointmentType");
        assert_eq!(err.value, "Dental");
        assert!(EmergencyStatus::from_str("PENDING").is_err());
    }
}
