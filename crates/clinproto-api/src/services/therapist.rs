use clinproto_core::endpoints;
use clinproto_core::models::therapist::{
    DecisionPointAck, DecisionPointEvaluation, PatientDetail, PatientTreatmentInfo,
    TherapistDashboard,
};
use clinproto_core::models::treatment::{
    ManagedTreatmentPlan, SessionCompleteAck, SessionDocumentationAck, SessionDocumentationCreate,
    SessionVitalsAck, TherapySession, TodaySession, TreatmentPlanCreate, VitalsData,
};

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn dashboard(client: &ApiClient) -> Result<TherapistDashboard, ApiError> {
    client.get(endpoints::THERAPIST_DASHBOARD).await
}

pub async fn sessions_today(client: &ApiClient) -> Result<Vec<TodaySession>, ApiError> {
    client.get(endpoints::THERAPIST_SESSIONS_TODAY).await
}

/// Sessions in the next seven days.
pub async fn sessions_upcoming(client: &ApiClient) -> Result<Vec<TodaySession>, ApiError> {
    client.get(endpoints::THERAPIST_SESSIONS_UPCOMING).await
}

pub async fn patients(client: &ApiClient) -> Result<Vec<PatientTreatmentInfo>, ApiError> {
    client.get(endpoints::THERAPIST_PATIENTS).await
}

pub async fn patient(client: &ApiClient, id: i64) -> Result<PatientDetail, ApiError> {
    client.get(&endpoints::therapist_patient(id)).await
}

pub async fn create_treatment_plan(
    client: &ApiClient,
    form: &TreatmentPlanCreate,
) -> Result<ManagedTreatmentPlan, ApiError> {
    client.post(endpoints::THERAPIST_TREATMENT_PLANS, form).await
}

pub async fn session(client: &ApiClient, id: i64) -> Result<TherapySession, ApiError> {
    client.get(&endpoints::therapist_session(id)).await
}

pub async fn log_vitals(
    client: &ApiClient,
    session_id: i64,
    vitals: &VitalsData,
) -> Result<SessionVitalsAck, ApiError> {
    client
        .post(&endpoints::therapist_session_vitals(session_id), vitals)
        .await
}

/// Existing documentation, or an ack with `id == 0` when none was written.
pub async fn documentation(
    client: &ApiClient,
    session_id: i64,
) -> Result<SessionDocumentationAck, ApiError> {
    client
        .get(&endpoints::therapist_session_documentation(session_id))
        .await
}

pub async fn save_documentation(
    client: &ApiClient,
    session_id: i64,
    form: &SessionDocumentationCreate,
) -> Result<SessionDocumentationAck, ApiError> {
    client
        .post(&endpoints::therapist_session_documentation(session_id), form)
        .await
}

pub async fn complete_session(
    client: &ApiClient,
    session_id: i64,
) -> Result<SessionCompleteAck, ApiError> {
    client
        .post_empty(&endpoints::therapist_session_complete(session_id))
        .await
}

pub async fn evaluate_decision_point(
    client: &ApiClient,
    decision_point_id: i64,
    evaluation: &DecisionPointEvaluation,
) -> Result<DecisionPointAck, ApiError> {
    client
        .post(&endpoints::therapist_decision_point(decision_point_id), evaluation)
        .await
}
