//! Payloads for the AI assistance endpoints. All generation and scoring is
//! server-side; these are the shapes the client sends and renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Protocol extraction (admin) ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolExtractionRequest {
    /// 100..=50_000 characters.
    pub research_text: String,
    pub therapy_type: String,
    pub condition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedProtocol {
    pub name: String,
    pub version: String,
    pub therapy_type: String,
    pub condition_treated: String,
    pub evidence_level: String,
    pub overview: Option<String>,
    pub duration_weeks: Option<i32>,
    pub total_sessions: Option<i32>,
    pub evidence_sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedProtocolStep {
    pub sequence_order: i32,
    pub step_type: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub required_roles: Option<Vec<String>>,
    pub clinical_scales: Option<Vec<String>>,
    pub vitals_monitoring: Option<BTreeMap<String, bool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSafetyCheck {
    pub step_sequence: i32,
    pub check_type: String,
    pub condition: serde_json::Value,
    pub severity: String,
    pub override_allowed: String,
    pub evidence_source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolExtractionResponse {
    pub extracted_protocol: ExtractedProtocol,
    pub steps: Vec<ExtractedProtocolStep>,
    pub safety_checks: Vec<ExtractedSafetyCheck>,
    pub extraction_confidence: f64,
    pub warnings: Option<Vec<String>>,
}

// ── Patient education ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientContext {
    /// low, moderate, high
    pub anxiety_level: String,
    /// young_adult, adult, senior
    pub age_range: String,
    /// general, technical, medical
    pub education_level: String,
}

impl Default for PatientContext {
    fn default() -> Self {
        Self {
            anxiety_level: "moderate".to_string(),
            age_range: "adult".to_string(),
            education_level: "general".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientEducationRequest {
    pub protocol_id: i64,
    pub protocol_name: String,
    pub condition: String,
    pub patient_context: PatientContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientEducationResponse {
    pub education_text: String,
    pub word_count: i64,
    pub reading_time_minutes: i64,
    pub generated_at: String,
}

// ── Clinical decision support (clinicians) ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub step_sequence: i32,
    #[serde(default)]
    pub vitals: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub adverse_events: Vec<String>,
    #[serde(default)]
    pub clinical_scales: BTreeMap<String, f64>,
    pub subjective_experience: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolContext {
    pub protocol_name: String,
    pub current_step_title: String,
    pub step_type: String,
    pub evaluation_rules: Option<serde_json::Value>,
    pub safety_thresholds: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientHistory {
    #[serde(default)]
    pub baseline_measures: BTreeMap<String, f64>,
    #[serde(default)]
    pub previous_sessions: Vec<serde_json::Value>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalDecisionRequest {
    pub session_data: SessionData,
    pub protocol_context: ProtocolContext,
    pub patient_history: PatientHistory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    /// info, warning, urgent
    pub severity: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub category: String,
    pub priority: String,
    pub action: String,
    pub rationale: String,
    pub evidence_basis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPointAssessment {
    pub meets_continuation_criteria: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
    pub suggested_next_step: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalDecisionResponse {
    /// low, moderate, high, critical
    pub risk_level: String,
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    pub recommendations: Vec<ClinicalRecommendation>,
    pub decision_point_evaluation: Option<DecisionPointAssessment>,
    pub clinical_notes: String,
    #[serde(default)]
    pub requires_immediate_attention: bool,
    #[serde(default)]
    pub suggested_interventions: Vec<String>,
    pub confidence_score: f64,
}

impl ClinicalDecisionResponse {
    pub fn is_critical(&self) -> bool {
        self.risk_level == "critical" || self.requires_immediate_attention
    }
}
