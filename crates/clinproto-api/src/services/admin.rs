use clinproto_core::endpoints;
use clinproto_core::models::MessageAck;
use clinproto_core::models::protocol::{
    Protocol, ProtocolCreate, ProtocolStep, ProtocolStepCreate, ProtocolStepUpdate,
    ProtocolUpdate, SafetyCheck, SafetyCheckCreate,
};
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn create_protocol(client: &ApiClient, form: &ProtocolCreate) -> Result<Protocol, ApiError> {
    let protocol: Protocol = client.post(endpoints::ADMIN_PROTOCOLS, form).await?;
    info!(protocol_id = protocol.id, name = %protocol.name, "protocol created");
    Ok(protocol)
}

pub async fn update_protocol(
    client: &ApiClient,
    id: i64,
    update: &ProtocolUpdate,
) -> Result<Protocol, ApiError> {
    client.put(&endpoints::admin_protocol(id), update).await
}

/// Archives the protocol; the server keeps it for history.
pub async fn delete_protocol(client: &ApiClient, id: i64) -> Result<MessageAck, ApiError> {
    let ack: MessageAck = client.delete(&endpoints::admin_protocol(id)).await?;
    info!(protocol_id = id, "protocol archived");
    Ok(ack)
}

pub async fn add_step(
    client: &ApiClient,
    protocol_id: i64,
    form: &ProtocolStepCreate,
) -> Result<ProtocolStep, ApiError> {
    client
        .post(&endpoints::admin_protocol_steps(protocol_id), form)
        .await
}

pub async fn update_step(
    client: &ApiClient,
    protocol_id: i64,
    step_id: i64,
    update: &ProtocolStepUpdate,
) -> Result<ProtocolStep, ApiError> {
    client
        .put(&endpoints::admin_protocol_step(protocol_id, step_id), update)
        .await
}

pub async fn delete_step(
    client: &ApiClient,
    protocol_id: i64,
    step_id: i64,
) -> Result<MessageAck, ApiError> {
    client
        .delete(&endpoints::admin_protocol_step(protocol_id, step_id))
        .await
}

pub async fn add_safety_check(
    client: &ApiClient,
    protocol_id: i64,
    step_id: i64,
    form: &SafetyCheckCreate,
) -> Result<SafetyCheck, ApiError> {
    client
        .post(&endpoints::admin_safety_checks(protocol_id, step_id), form)
        .await
}

/// Move a draft protocol to active.
pub async fn publish(client: &ApiClient, id: i64) -> Result<Protocol, ApiError> {
    let protocol: Protocol = client.post(&endpoints::admin_publish(id), &json!({})).await?;
    info!(protocol_id = id, status = %protocol.status, "protocol published");
    Ok(protocol)
}
