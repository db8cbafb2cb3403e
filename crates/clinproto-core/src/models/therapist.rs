use serde::{Deserialize, Serialize};

use crate::models::DateTime;
use crate::models::treatment::{ManagedTreatmentPlan, TherapySession, TodaySession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistDashboard {
    pub today_sessions: Vec<TodaySession>,
    pub pending_tasks: Vec<PendingTask>,
    pub active_patients_count: i64,
    pub upcoming_sessions_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTask {
    /// documentation, decision_point, review
    pub task_type: String,
    pub session_id: Option<i64>,
    pub treatment_plan_id: Option<i64>,
    pub description: String,
    /// high, medium, low
    pub priority: String,
    pub due_date: Option<DateTime>,
}

/// Row of the therapist's patient list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientTreatmentInfo {
    pub id: i64,
    pub email: String,
    pub date_of_birth: Option<String>,
    pub treatment_plan_id: Option<i64>,
    pub protocol_name: Option<String>,
    pub treatment_status: Option<String>,
    pub next_session: Option<DateTime>,
}

/// Full patient record for the therapist's patient page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDetail {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub date_of_birth: Option<DateTime>,
    pub medical_history: Option<serde_json::Value>,
    pub medications: Option<Vec<String>>,
    pub contraindications: Option<Vec<String>>,
    #[serde(default)]
    pub treatment_plans: Vec<ManagedTreatmentPlan>,
    #[serde(default)]
    pub session_history: Vec<TherapySession>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPointEvaluation {
    pub treatment_plan_id: i64,
    pub evaluation_criteria: serde_json::Value,
    /// continue, adjust, discontinue
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPointAck {
    pub decision_point_id: i64,
    pub treatment_plan_id: i64,
    pub recommendation: String,
    pub evaluation_data: serde_json::Value,
    pub message: String,
    pub timestamp: DateTime,
}
