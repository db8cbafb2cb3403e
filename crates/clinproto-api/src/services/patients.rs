use std::collections::BTreeMap;

use clinproto_core::endpoints;
use clinproto_core::models::patient::{
    ConsentRecord, ConsentRequest, ConsultationAck, ConsultationRequest, PreScreeningRequest,
    PreScreeningResult, Provider, ProviderSearchFilters,
};
use clinproto_core::models::treatment::{TreatmentPlan, TreatmentPlanDetail};
use serde_json::Value;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn search_providers(
    client: &ApiClient,
    filters: &ProviderSearchFilters,
) -> Result<Vec<Provider>, ApiError> {
    client
        .get_with_query(endpoints::PATIENT_PROVIDER_SEARCH, filters.query_pairs())
        .await
}

/// Submit quiz answers. The verdict is computed server-side.
pub async fn pre_screen(
    client: &ApiClient,
    protocol_id: i64,
    responses: BTreeMap<String, Value>,
) -> Result<PreScreeningResult, ApiError> {
    let request = PreScreeningRequest {
        protocol_id,
        responses,
    };
    client
        .post(&endpoints::patient_pre_screen(protocol_id), &request)
        .await
}

pub async fn request_consultation(
    client: &ApiClient,
    request: &ConsultationRequest,
) -> Result<ConsultationAck, ApiError> {
    client.post(endpoints::PATIENT_CONSULTATION, request).await
}

pub async fn treatment_plans(client: &ApiClient) -> Result<Vec<TreatmentPlan>, ApiError> {
    client.get(endpoints::PATIENT_TREATMENT_PLANS).await
}

pub async fn treatment_plan(client: &ApiClient, id: i64) -> Result<TreatmentPlanDetail, ApiError> {
    client.get(&endpoints::patient_treatment_plan(id)).await
}

pub async fn sign_consent(
    client: &ApiClient,
    request: &ConsentRequest,
) -> Result<ConsentRecord, ApiError> {
    let record: ConsentRecord = client
        .post(&endpoints::patient_consent(request.treatment_plan_id), request)
        .await?;
    info!(plan_id = record.treatment_plan_id, "consent signed");
    Ok(record)
}
