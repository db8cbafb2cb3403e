use clinproto_core::endpoints;
use clinproto_core::models::chat::{ChatMessageRequest, ChatReply, ChatSession, ChatSessionCreate};

use crate::client::ApiClient;
use crate::error::ApiError;

pub async fn start(client: &ApiClient, protocol_id: i64) -> Result<ChatSession, ApiError> {
    client
        .post(endpoints::CHAT_START, &ChatSessionCreate { protocol_id })
        .await
}

pub async fn send(client: &ApiClient, session_id: i64, message: &str) -> Result<ChatReply, ApiError> {
    let request = ChatMessageRequest {
        session_id,
        message: message.to_string(),
    };
    client.post(endpoints::CHAT_MESSAGE, &request).await
}
