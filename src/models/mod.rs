//! Record types held by the in-memory state container.
//!
//! Every record carries a generated `id` plus display-ready date/time
//! strings stamped at creation. The `New*` types are the user-supplied
//! halves accepted by the container's `add_*` operations.

pub mod appointment;
pub mod emergency;
pub mod enums;
pub mod medication;
pub mod question;
pub mod reminder;
pub mod symptom;

pub use appointment::{Appointment, NewAppointment};
pub use emergency::{Emergency, NewEmergency};
pub use enums::{AppointmentType, EmergencyStatus, InvalidEnum};
pub use medication::{MedicationLog, NewMedicationLog};
pub use question::{NewQuestion, Question, PENDING_ANSWER};
pub use reminder::{NewReminder, Reminder};
pub use symptom::{NewSymptom, Symptom};
