use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::DateTime;

/// A named, versioned treatment record with ordered steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Protocol {
    pub id: i64,
    pub name: String,
    pub version: String,
    #[ts(type = "string")]
    pub status: ProtocolStatus,
    pub therapy_type: TherapyType,
    pub condition_treated: String,
    pub evidence_level: EvidenceLevel,
    pub overview: Option<String>,
    pub duration_weeks: Option<i32>,
    pub total_sessions: Option<i32>,
    #[ts(type = "string")]
    pub created_at: DateTime,
    #[ts(type = "string | null")]
    pub updated_at: Option<DateTime>,
    /// Present on the detail endpoint only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<ProtocolStep>>,
}

impl Protocol {
    /// Steps sorted by `sequence_order`; empty when the steps were not loaded.
    pub fn ordered_steps(&self) -> Vec<&ProtocolStep> {
        let mut steps: Vec<&ProtocolStep> = self.steps.iter().flatten().collect();
        steps.sort_by_key(|s| s.sequence_order);
        steps
    }
}

/// Server-owned status string. Unknown values round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProtocolStatus {
    Draft,
    Active,
    Archived,
    Other(String),
}

impl ProtocolStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProtocolStatus::Draft => "draft",
            ProtocolStatus::Active => "active",
            ProtocolStatus::Archived => "archived",
            ProtocolStatus::Other(s) => s,
        }
    }
}

impl From<String> for ProtocolStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "draft" => ProtocolStatus::Draft,
            "active" => ProtocolStatus::Active,
            "archived" => ProtocolStatus::Archived,
            _ => ProtocolStatus::Other(s),
        }
    }
}

impl From<ProtocolStatus> for String {
    fn from(status: ProtocolStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProtocolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TherapyType {
    // Psychedelic
    Psilocybin,
    Mdma,
    Ketamine,
    Lsd,
    Ibogaine,
    // Hormone
    Testosterone,
    Estrogen,
    GrowthHormone,
    Peptides,
    // Oncology
    Chemotherapy,
    Immunotherapy,
    Radiation,
    // Regenerative
    StemCell,
    PlateletRichPlasma,
    Exosome,
    // Genetic
    GeneTherapy,
    Crispr,
    CarT,
    Longevity,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EvidenceLevel {
    #[serde(rename = "fda_approved")]
    FdaApproved,
    #[serde(rename = "phase_3_trial")]
    Phase3,
    #[serde(rename = "phase_2_trial")]
    Phase2,
    #[serde(rename = "phase_1_trial")]
    Phase1,
    #[serde(rename = "preclinical")]
    Preclinical,
    #[serde(rename = "clinical_practice")]
    ClinicalPractice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StepType {
    Screening,
    Preparation,
    Dosing,
    Integration,
    DecisionPoint,
    Followup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProtocolStep {
    pub id: i64,
    pub protocol_id: i64,
    pub sequence_order: i32,
    pub step_type: StepType,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub required_roles: Option<Vec<String>>,
    pub clinical_scales: Option<Vec<String>>,
    #[serde(default)]
    pub safety_checks: Vec<SafetyCheck>,
    #[ts(type = "string")]
    pub created_at: DateTime,
}

impl ProtocolStep {
    pub fn blocking_checks(&self) -> impl Iterator<Item = &SafetyCheck> {
        self.safety_checks
            .iter()
            .filter(|c| c.severity == Severity::Blocking)
    }
}

/// Declarative condition/severity record attached to a step. Evaluated
/// server-side; the client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SafetyCheck {
    pub id: i64,
    pub protocol_step_id: i64,
    pub check_type: String,
    pub condition: serde_json::Value,
    pub severity: Severity,
    #[serde(deserialize_with = "bool_or_string")]
    pub override_allowed: bool,
    pub override_requirements: Option<serde_json::Value>,
    pub evidence_source: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Blocking,
    Warning,
    Info,
}

/// The server stores `override_allowed` as the strings `"true"`/`"false"`.
fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::custom(format!(
                "expected \"true\" or \"false\", got {other:?}"
            ))),
        },
    }
}

fn as_bool_string<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(if *value { "true" } else { "false" })
}

// ── Listing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolList {
    pub items: Vec<Protocol>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolSearch {
    pub items: Vec<Protocol>,
    pub total: i64,
}

// ── Admin authoring payloads ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolCreate {
    pub name: String,
    pub version: String,
    pub therapy_type: TherapyType,
    pub condition_treated: String,
    pub evidence_level: EvidenceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_sources: Option<Vec<String>>,
}

/// Partial update; `None` fields are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapy_type: Option<TherapyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_treated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_level: Option<EvidenceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_sources: Option<Vec<String>>,
}

impl ProtocolUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.version.is_none()
            && self.therapy_type.is_none()
            && self.condition_treated.is_none()
            && self.evidence_level.is_none()
            && self.overview.is_none()
            && self.duration_weeks.is_none()
            && self.total_sessions.is_none()
            && self.evidence_sources.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolStepCreate {
    pub sequence_order: i32,
    pub step_type: StepType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_scales: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_rules: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_outcomes: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitals_monitoring: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolStepUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_type: Option<StepType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_scales: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyCheckCreate {
    pub check_type: String,
    pub condition: serde_json::Value,
    pub severity: Severity,
    #[serde(
        serialize_with = "as_bool_string",
        deserialize_with = "bool_or_string"
    )]
    pub override_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_requirements: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_source: Option<String>,
}

// ── String forms ────────────────────────────────────────────────────────────

/// Parse a snake_case wire name into one of the closed enums above.
fn parse_wire<T: serde::de::DeserializeOwned>(kind: &'static str, s: &str) -> Result<T, CoreError> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|_| {
        CoreError::UnknownVariant {
            kind,
            value: s.to_string(),
        }
    })
}

fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

macro_rules! wire_string {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_wire($kind, s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&wire_name(self))
            }
        }
    };
}

wire_string!(TherapyType, "therapy type");
wire_string!(EvidenceLevel, "evidence level");
wire_string!(StepType, "step type");
wire_string!(Severity, "severity");
