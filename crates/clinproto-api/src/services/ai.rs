use clinproto_core::endpoints;
use clinproto_core::models::ai::{
    ClinicalDecisionRequest, ClinicalDecisionResponse, PatientEducationRequest,
    PatientEducationResponse, ProtocolExtractionRequest, ProtocolExtractionResponse,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Draft a structured protocol from research text.
pub async fn extract_protocol(
    client: &ApiClient,
    request: &ProtocolExtractionRequest,
) -> Result<ProtocolExtractionResponse, ApiError> {
    client.post(endpoints::AI_EXTRACT_PROTOCOL, request).await
}

pub async fn patient_education(
    client: &ApiClient,
    request: &PatientEducationRequest,
) -> Result<PatientEducationResponse, ApiError> {
    client.post(endpoints::AI_PATIENT_EDUCATION, request).await
}

pub async fn decision_support(
    client: &ApiClient,
    request: &ClinicalDecisionRequest,
) -> Result<ClinicalDecisionResponse, ApiError> {
    client.post(endpoints::AI_DECISION_SUPPORT, request).await
}
