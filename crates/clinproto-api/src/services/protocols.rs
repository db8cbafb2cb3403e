use clinproto_core::endpoints;
use clinproto_core::models::protocol::{
    EvidenceLevel, Protocol, ProtocolList, ProtocolSearch, ProtocolStep, TherapyType,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Catalogue filters. Unset fields are left to server defaults
/// (page 1, size 10). The catalogue only ever lists active protocols.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub therapy_type: Option<TherapyType>,
    pub condition: Option<String>,
    pub evidence_level: Option<EvidenceLevel>,
}

impl ProtocolQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(therapy_type) = self.therapy_type {
            pairs.push(("therapy_type", therapy_type.to_string()));
        }
        if let Some(condition) = &self.condition {
            pairs.push(("condition", condition.clone()));
        }
        if let Some(evidence_level) = self.evidence_level {
            pairs.push(("evidence_level", evidence_level.to_string()));
        }
        pairs
    }
}

pub async fn list(client: &ApiClient, query: &ProtocolQuery) -> Result<ProtocolList, ApiError> {
    client
        .get_with_query(endpoints::PROTOCOLS, query.query_pairs())
        .await
}

pub async fn search(client: &ApiClient, q: &str) -> Result<ProtocolSearch, ApiError> {
    client
        .get_with_query(endpoints::PROTOCOL_SEARCH, vec![("q", q.to_string())])
        .await
}

/// Protocol with its ordered steps and safety checks.
pub async fn get(client: &ApiClient, id: i64) -> Result<Protocol, ApiError> {
    client.get(&endpoints::protocol(id)).await
}

pub async fn steps(client: &ApiClient, id: i64) -> Result<Vec<ProtocolStep>, ApiError> {
    client.get(&endpoints::protocol_steps(id)).await
}
