use clinproto_api::ApiError;
use clinproto_core::validation::FormErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("screening is already complete")]
    AlreadyCompleted,

    #[error("screening session was abandoned")]
    Abandoned,

    #[error("incomplete answers: {0}")]
    Incomplete(FormErrors),

    #[error("invalid answer for {question}: {reason}")]
    InvalidAnswer { question: String, reason: String },
}

impl ScreeningError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
