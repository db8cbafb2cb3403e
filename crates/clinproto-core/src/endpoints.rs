//! REST path conventions.
//!
//! Pure string functions with no HTTP dependency. Paths are relative to the
//! configured API origin and owned by the server; the client only mirrors them.

// ── Auth ────────────────────────────────────────────────────────────────────

pub const AUTH_LOGIN: &str = "/api/v1/auth/login";
pub const AUTH_REGISTER: &str = "/api/v1/auth/register";
pub const AUTH_REFRESH: &str = "/api/v1/auth/refresh";
pub const AUTH_ME: &str = "/api/v1/auth/me";
pub const AUTH_LOGOUT: &str = "/api/v1/auth/logout";

/// Auth endpoints that must never trigger a token refresh on 401.
pub fn is_credential_exchange(path: &str) -> bool {
    matches!(path, AUTH_LOGIN | AUTH_REGISTER | AUTH_REFRESH)
}

// ── Protocol catalogue ──────────────────────────────────────────────────────

pub const PROTOCOLS: &str = "/api/v1/protocols";
pub const PROTOCOL_SEARCH: &str = "/api/v1/protocols/search";

pub fn protocol(id: i64) -> String {
    format!("{PROTOCOLS}/{id}")
}

pub fn protocol_steps(id: i64) -> String {
    format!("{PROTOCOLS}/{id}/steps")
}

// ── Admin authoring ─────────────────────────────────────────────────────────

pub const ADMIN_PROTOCOLS: &str = "/api/v1/admin/protocols";

pub fn admin_protocol(id: i64) -> String {
    format!("{ADMIN_PROTOCOLS}/{id}")
}

pub fn admin_protocol_steps(id: i64) -> String {
    format!("{ADMIN_PROTOCOLS}/{id}/steps")
}

pub fn admin_protocol_step(protocol_id: i64, step_id: i64) -> String {
    format!("{ADMIN_PROTOCOLS}/{protocol_id}/steps/{step_id}")
}

pub fn admin_safety_checks(protocol_id: i64, step_id: i64) -> String {
    format!("{ADMIN_PROTOCOLS}/{protocol_id}/steps/{step_id}/safety-checks")
}

pub fn admin_publish(id: i64) -> String {
    format!("{ADMIN_PROTOCOLS}/{id}/publish")
}

// ── Therapist ───────────────────────────────────────────────────────────────

pub const THERAPIST_DASHBOARD: &str = "/api/v1/therapist/dashboard";
pub const THERAPIST_SESSIONS_TODAY: &str = "/api/v1/therapist/sessions/today";
pub const THERAPIST_SESSIONS_UPCOMING: &str = "/api/v1/therapist/sessions/upcoming";
pub const THERAPIST_PATIENTS: &str = "/api/v1/therapist/patients";
pub const THERAPIST_TREATMENT_PLANS: &str = "/api/v1/therapist/treatment-plans";

pub fn therapist_patient(id: i64) -> String {
    format!("{THERAPIST_PATIENTS}/{id}")
}

pub fn therapist_session(id: i64) -> String {
    format!("/api/v1/therapist/sessions/{id}")
}

pub fn therapist_session_vitals(id: i64) -> String {
    format!("/api/v1/therapist/sessions/{id}/vitals")
}

pub fn therapist_session_documentation(id: i64) -> String {
    format!("/api/v1/therapist/sessions/{id}/documentation")
}

pub fn therapist_session_complete(id: i64) -> String {
    format!("/api/v1/therapist/sessions/{id}/complete")
}

pub fn therapist_decision_point(id: i64) -> String {
    format!("/api/v1/therapist/decision-points/{id}/evaluate")
}

// ── Patient ─────────────────────────────────────────────────────────────────

pub const PATIENT_PROVIDER_SEARCH: &str = "/api/v1/patients/providers/search";
pub const PATIENT_CONSULTATION: &str = "/api/v1/patients/consultation-request";
pub const PATIENT_TREATMENT_PLANS: &str = "/api/v1/patients/treatment-plans";

pub fn patient_pre_screen(protocol_id: i64) -> String {
    format!("/api/v1/patients/protocols/{protocol_id}/pre-screen")
}

pub fn patient_treatment_plan(id: i64) -> String {
    format!("{PATIENT_TREATMENT_PLANS}/{id}")
}

pub fn patient_consent(plan_id: i64) -> String {
    format!("/api/v1/patients/consent/{plan_id}")
}

// ── Pre-screening chat ──────────────────────────────────────────────────────

pub const CHAT_START: &str = "/api/v1/chat/start";
pub const CHAT_MESSAGE: &str = "/api/v1/chat/message";

// ── AI assistance ───────────────────────────────────────────────────────────

pub const AI_EXTRACT_PROTOCOL: &str = "/api/v1/ai/extract-protocol";
pub const AI_PATIENT_EDUCATION: &str = "/api/v1/ai/generate-patient-education";
pub const AI_DECISION_SUPPORT: &str = "/api/v1/ai/decision-support";
