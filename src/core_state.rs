//! In-memory application state shared by every request handler.
//!
//! `CoreState` holds the six record collections. It is created once at
//! startup, wrapped in `Arc`, and handed to the API layer explicitly.
//! Uses `RwLock` so list/detail reads proceed concurrently while
//! inserts and removals take the write lock briefly.
//!
//! Collections are newest-first: every `add_*` prepends. Nothing is
//! persisted; state lives as long as the process.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local, TimeZone};

use crate::models::{
    Appointment, Emergency, EmergencyStatus, MedicationLog, NewAppointment, NewEmergency,
    NewMedicationLog, NewQuestion, NewReminder, NewSymptom, Question, Reminder, Symptom,
    PENDING_ANSWER,
};

/// `10/18/2026`
const DATE_FORMAT: &str = "%-m/%-d/%Y";
/// `02:05 PM`
const TIME_FORMAT: &str = "%I:%M %p";

// ═══════════════════════════════════════════════════════════
// Collections
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct Collections {
    symptoms: Vec<Symptom>,
    reminders: Vec<Reminder>,
    appointments: Vec<Appointment>,
    questions: Vec<Question>,
    medication_logs: Vec<MedicationLog>,
    emergencies: Vec<Emergency>,
}

/// Per-collection record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCounts {
    pub symptoms: usize,
    pub reminders: usize,
    pub appointments: usize,
    pub questions: usize,
    pub medication_logs: usize,
    pub emergencies: usize,
}

// ═══════════════════════════════════════════════════════════
// Identifiers and timestamps
// ═══════════════════════════════════════════════════════════

/// Timestamp-derived identifiers: milliseconds since the epoch, bumped
/// past the previous value so two records created in the same
/// millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier for a record created at `now_millis`.
    pub fn next_at(&self, now_millis: i64) -> String {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Display strings stamped onto a record at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub millis: i64,
    pub date: String,
    pub time: String,
}

impl Stamp {
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            millis: at.timestamp_millis(),
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
        }
    }

    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

/// Session-scoped holder of the application's record collections.
#[derive(Debug, Default)]
pub struct CoreState {
    collections: RwLock<Collections>,
    ids: IdGenerator,
}

impl CoreState {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, CoreError> {
        self.collections.read().map_err(|_| CoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, CoreError> {
        self.collections.write().map_err(|_| CoreError::LockPoisoned)
    }

    fn stamp(&self) -> (String, Stamp) {
        let stamp = Stamp::now();
        (self.ids.next_at(stamp.millis), stamp)
    }

    // ── Symptoms ────────────────────────────────────────────

    pub fn add_symptom(&self, new: NewSymptom) -> Result<Symptom, CoreError> {
        let (id, stamp) = self.stamp();
        let record = Symptom {
            id,
            symptom: new.symptom,
            duration: new.duration,
            date: stamp.date,
        };
        self.write()?.symptoms.insert(0, record.clone());
        tracing::debug!(id = %record.id, "Symptom recorded");
        Ok(record)
    }

    pub fn list_symptoms(&self) -> Result<Vec<Symptom>, CoreError> {
        Ok(self.read()?.symptoms.clone())
    }

    pub fn get_symptom(&self, id: &str) -> Result<Option<Symptom>, CoreError> {
        Ok(self.read()?.symptoms.iter().find(|s| s.id == id).cloned())
    }

    // ── Reminders ───────────────────────────────────────────

    pub fn add_reminder(&self, new: NewReminder) -> Result<Reminder, CoreError> {
        let (id, stamp) = self.stamp();
        let record = Reminder {
            id,
            medication: new.medication,
            time: new.time,
            date: stamp.date,
        };
        self.write()?.reminders.insert(0, record.clone());
        tracing::debug!(id = %record.id, "Reminder set");
        Ok(record)
    }

    pub fn list_reminders(&self) -> Result<Vec<Reminder>, CoreError> {
        Ok(self.read()?.reminders.clone())
    }

    pub fn get_reminder(&self, id: &str) -> Result<Option<Reminder>, CoreError> {
        Ok(self.read()?.reminders.iter().find(|r| r.id == id).cloned())
    }

    /// Cancel a reminder. Returns `false` when no reminder had that id.
    pub fn remove_reminder(&self, id: &str) -> Result<bool, CoreError> {
        let mut guard = self.write()?;
        let before = guard.reminders.len();
        guard.reminders.retain(|r| r.id != id);
        let removed = guard.reminders.len() != before;
        if removed {
            tracing::debug!(id, "Reminder cancelled");
        }
        Ok(removed)
    }

    // ── Appointments ────────────────────────────────────────

    pub fn add_appointment(&self, new: NewAppointment) -> Result<Appointment, CoreError> {
        let (id, stamp) = self.stamp();
        let record = Appointment {
            id,
            date: new.date,
            time: new.time,
            appointment_type: new.appointment_type,
            created_at: stamp.date,
        };
        self.write()?.appointments.insert(0, record.clone());
        tracing::debug!(id = %record.id, kind = %record.appointment_type, "Appointment booked");
        Ok(record)
    }

    pub fn list_appointments(&self) -> Result<Vec<Appointment>, CoreError> {
        Ok(self.read()?.appointments.clone())
    }

    pub fn get_appointment(&self, id: &str) -> Result<Option<Appointment>, CoreError> {
        Ok(self.read()?.appointments.iter().find(|a| a.id == id).cloned())
    }

    // ── Questions ───────────────────────────────────────────

    pub fn add_question(&self, new: NewQuestion) -> Result<Question, CoreError> {
        let (id, stamp) = self.stamp();
        let record = Question {
            id,
            question: new.question,
            answer: PENDING_ANSWER.to_string(),
            date: stamp.date,
        };
        self.write()?.questions.insert(0, record.clone());
        tracing::debug!(id = %record.id, "Question submitted");
        Ok(record)
    }

    pub fn list_questions(&self) -> Result<Vec<Question>, CoreError> {
        Ok(self.read()?.questions.clone())
    }

    pub fn get_question(&self, id: &str) -> Result<Option<Question>, CoreError> {
        Ok(self.read()?.questions.iter().find(|q| q.id == id).cloned())
    }

    // ── Medication logs ─────────────────────────────────────

    pub fn add_medication_log(&self, new: NewMedicationLog) -> Result<MedicationLog, CoreError> {
        let (id, stamp) = self.stamp();
        let record = MedicationLog {
            id,
            medication: new.medication,
            date: stamp.date,
            time: stamp.time,
        };
        self.write()?.medication_logs.insert(0, record.clone());
        tracing::debug!(id = %record.id, "Medication intake logged");
        Ok(record)
    }

    pub fn list_medication_logs(&self) -> Result<Vec<MedicationLog>, CoreError> {
        Ok(self.read()?.medication_logs.clone())
    }

    pub fn get_medication_log(&self, id: &str) -> Result<Option<MedicationLog>, CoreError> {
        Ok(self.read()?.medication_logs.iter().find(|m| m.id == id).cloned())
    }

    // ── Emergencies ─────────────────────────────────────────

    pub fn add_emergency(&self, new: NewEmergency) -> Result<Emergency, CoreError> {
        let (id, stamp) = self.stamp();
        let record = Emergency {
            id,
            description: new.description,
            date: stamp.date,
            time: stamp.time,
            status: EmergencyStatus::Pending,
        };
        self.write()?.emergencies.insert(0, record.clone());
        tracing::warn!(id = %record.id, "Emergency request filed");
        Ok(record)
    }

    pub fn list_emergencies(&self) -> Result<Vec<Emergency>, CoreError> {
        Ok(self.read()?.emergencies.clone())
    }

    pub fn get_emergency(&self, id: &str) -> Result<Option<Emergency>, CoreError> {
        Ok(self.read()?.emergencies.iter().find(|e| e.id == id).cloned())
    }

    // ── Summary ─────────────────────────────────────────────

    pub fn counts(&self) -> Result<CollectionCounts, CoreError> {
        let guard = self.read()?;
        Ok(CollectionCounts {
            symptoms: guard.symptoms.len(),
            reminders: guard.reminders.len(),
            appointments: guard.appointments.len(),
            questions: guard.questions.len(),
            medication_logs: guard.medication_logs.len(),
            emergencies: guard.emergencies.len(),
        })
    }
}

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
