use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::DateTime;
use crate::models::protocol::TherapyType;

// ── Provider search ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSearchFilters {
    pub location: Option<String>,
    pub therapy_type: Option<TherapyType>,
    pub protocol: Option<String>,
    /// e.g. `next_week`, `next_month`
    pub availability: Option<String>,
}

impl ProviderSearchFilters {
    /// Non-empty filters as query pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(location) = &self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(therapy_type) = self.therapy_type {
            pairs.push(("therapy_type", therapy_type.to_string()));
        }
        if let Some(protocol) = &self.protocol {
            pairs.push(("protocol", protocol.clone()));
        }
        if let Some(availability) = &self.availability {
            pairs.push(("availability", availability.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicInfo {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistInfo {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub license_type: String,
    pub license_number: String,
    pub license_state: String,
    pub specialties: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub protocols_certified: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub therapist: TherapistInfo,
    pub clinic: Option<ClinicInfo>,
}

// ── Pre-screening ───────────────────────────────────────────────────────────

/// Quiz answers keyed by question id (`age`, `heart_condition`, `medications`, …).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreScreeningRequest {
    pub protocol_id: i64,
    pub responses: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Excluded,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Excluded => "excluded",
        }
    }
}

/// Eligibility verdict computed by the server. Rendered verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreScreeningResult {
    pub risk_level: RiskLevel,
    pub eligible: bool,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl PreScreeningResult {
    /// Typed view over the opaque `eligibility_result` of a completed chat.
    pub fn from_eligibility(value: &serde_json::Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

// ── Consultation & consent ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub therapist_id: i64,
    pub protocol_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationAck {
    pub message: String,
    pub consultation_id: i64,
    pub therapist_id: i64,
    pub protocol_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRequest {
    pub treatment_plan_id: i64,
    pub consent_text: String,
    /// Patient's full name.
    pub signature: String,
    pub agreed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub id: i64,
    pub treatment_plan_id: i64,
    pub signed_at: DateTime,
    pub signature: String,
    pub consent_version: String,
}
