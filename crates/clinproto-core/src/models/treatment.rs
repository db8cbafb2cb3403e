use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::DateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TreatmentStatus {
    Screening,
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

impl TreatmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentStatus::Screening => "screening",
            TreatmentStatus::Active => "active",
            TreatmentStatus::Paused => "paused",
            TreatmentStatus::Completed => "completed",
        }
    }
}

/// A patient's instantiation of a protocol, as listed on the patient side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentPlan {
    pub id: i64,
    pub protocol_id: i64,
    pub protocol_name: String,
    pub protocol_version: String,
    pub therapist_id: i64,
    pub therapist_name: String,
    pub clinic_id: Option<i64>,
    pub clinic_name: Option<String>,
    pub status: TreatmentStatus,
    #[ts(type = "string")]
    pub start_date: DateTime,
    #[ts(type = "string | null")]
    pub estimated_completion: Option<DateTime>,
    #[ts(type = "string")]
    pub created_at: DateTime,
}

/// Treatment plan with its scheduled sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlanDetail {
    pub id: i64,
    pub protocol_id: i64,
    pub protocol_name: String,
    pub protocol_version: String,
    pub therapist_id: i64,
    pub therapist_name: String,
    pub clinic_id: Option<i64>,
    pub clinic_name: Option<String>,
    pub status: TreatmentStatus,
    pub start_date: DateTime,
    pub estimated_completion: Option<DateTime>,
    pub customizations: Option<serde_json::Value>,
    #[serde(default)]
    pub sessions: Vec<PlanSession>,
    pub created_at: DateTime,
}

impl TreatmentPlanDetail {
    /// Completed sessions as a whole percentage of all sessions.
    pub fn progress_percent(&self) -> u8 {
        if self.sessions.is_empty() {
            return 0;
        }
        let completed = self
            .sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .count();
        ((completed * 100) / self.sessions.len()) as u8
    }

    pub fn next_session(&self) -> Option<&PlanSession> {
        self.sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Scheduled)
            .min_by_key(|s| s.scheduled_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSession {
    pub id: i64,
    pub scheduled_at: DateTime,
    pub status: SessionStatus,
    pub location: String,
}

/// Treatment plan as created and listed by a therapist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedTreatmentPlan {
    pub id: i64,
    pub patient_id: i64,
    pub therapist_id: i64,
    pub clinic_id: Option<i64>,
    pub protocol_id: i64,
    pub protocol_version: String,
    pub status: TreatmentStatus,
    pub start_date: DateTime,
    pub estimated_completion: Option<DateTime>,
    pub customizations: Option<serde_json::Value>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentPlanCreate {
    pub patient_id: i64,
    pub protocol_id: i64,
    pub start_date: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customizations: Option<serde_json::Value>,
}

// ── Therapy sessions ────────────────────────────────────────────────────────

/// One scheduled therapy session with its step, vitals, and documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: i64,
    pub treatment_plan_id: i64,
    pub protocol_step_id: i64,
    pub scheduled_at: DateTime,
    pub actual_start: Option<DateTime>,
    pub actual_end: Option<DateTime>,
    pub status: SessionStatus,
    pub location: String,
    pub therapist_id: i64,
    pub patient_id: i64,
    pub patient_email: String,
    pub step_title: String,
    pub step_description: Option<String>,
    pub vitals: Option<Vec<serde_json::Value>>,
    pub documentation: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySession {
    pub id: i64,
    pub patient_id: i64,
    pub patient_email: String,
    pub scheduled_at: DateTime,
    pub status: String,
    pub location: String,
    pub step_title: String,
}

/// One vitals reading taken during a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitalsData {
    /// e.g. `"120/80"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i32>,
    /// Fahrenheit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spo2: Option<i32>,
    #[ts(type = "string")]
    pub timestamp: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionVitalsAck {
    pub message: String,
    pub vitals_logged: i64,
    pub session_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDocumentationCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_subjective_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_scales: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adverse_events: Option<Vec<AdverseEvent>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdverseEvent {
    pub event_type: String,
    /// mild, moderate, severe
    pub severity: String,
    pub description: String,
    pub timestamp: DateTime,
    pub action_taken: String,
}

/// Acknowledgement for documentation reads and writes. `id == 0` means no
/// documentation exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocumentationAck {
    pub id: i64,
    pub treatment_session_id: i64,
    pub message: String,
}

impl SessionDocumentationAck {
    pub fn exists(&self) -> bool {
        self.id != 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCompleteAck {
    pub id: i64,
    pub status: String,
    pub actual_end: DateTime,
    pub message: String,
}
