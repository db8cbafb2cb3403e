//! Pre-screening flows: the conversational chat and the fixed quiz.
//!
//! Both are thin: the server decides eligibility, the client keeps the
//! transcript or the answers and shows the verdict as given.

use std::collections::BTreeMap;

use clinproto_api::ApiClient;
use clinproto_api::services::{chat, patients};
use clinproto_core::error::CoreError;
use clinproto_core::models::chat::{ChatMessage, ChatStatus};
use clinproto_core::models::patient::PreScreeningResult;
use clinproto_core::validation::FormErrors;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ScreeningError;

// ── Chat ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    /// The assistant replied and the interview continues.
    InProgress,
    /// The server finished the interview. Carries `eligibility_result`
    /// exactly as received.
    Completed(Value),
}

/// Component-local state of one screening conversation.
pub struct ScreeningChat {
    api: ApiClient,
    session_id: i64,
    protocol_id: i64,
    messages: Vec<ChatMessage>,
    status: ChatStatus,
    eligibility: Option<Value>,
    error: Option<String>,
}

impl ScreeningChat {
    /// Open the server-side session and seed the transcript with whatever
    /// the server already said.
    pub async fn open(api: ApiClient, protocol_id: i64) -> Result<Self, ScreeningError> {
        let session = chat::start(&api, protocol_id).await?;
        info!(session_id = session.session_id, protocol_id, "screening chat opened");
        Ok(Self {
            api,
            session_id: session.session_id,
            protocol_id: session.protocol_id,
            messages: session.history,
            status: session.status,
            eligibility: None,
            error: None,
        })
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn protocol_id(&self) -> i64 {
        self.protocol_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn status(&self) -> ChatStatus {
        self.status
    }

    /// Banner text from the last failed send, cleared on the next send.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn eligibility(&self) -> Option<&Value> {
        self.eligibility.as_ref()
    }

    /// Typed view over the eligibility result, when it has the usual shape.
    pub fn verdict(&self) -> Option<Result<PreScreeningResult, CoreError>> {
        self.eligibility
            .as_ref()
            .map(PreScreeningResult::from_eligibility)
    }

    /// Send one user message.
    ///
    /// The message joins the transcript before the request goes out and
    /// stays there if the request fails.
    pub async fn send(&mut self, text: &str) -> Result<ChatOutcome, ScreeningError> {
        match self.status {
            ChatStatus::Completed => return Err(ScreeningError::AlreadyCompleted),
            ChatStatus::Abandoned => return Err(ScreeningError::Abandoned),
            ChatStatus::InProgress => {}
        }

        let text = text.trim();
        if text.is_empty() {
            return Ok(ChatOutcome::Ignored);
        }

        self.messages.push(ChatMessage::user(text));
        self.error = None;

        let reply = match chat::send(&self.api, self.session_id, text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session_id = self.session_id, error = %e, "screening message failed");
                self.error = Some(e.user_message());
                return Err(e.into());
            }
        };

        self.messages.push(ChatMessage::assistant(reply.response));
        self.status = reply.status;

        match reply.status {
            ChatStatus::Completed => {
                let result = reply.eligibility_result.unwrap_or(Value::Null);
                info!(session_id = self.session_id, "screening completed");
                self.eligibility = Some(result.clone());
                Ok(ChatOutcome::Completed(result))
            }
            ChatStatus::Abandoned => Err(ScreeningError::Abandoned),
            ChatStatus::InProgress => Ok(ChatOutcome::InProgress),
        }
    }
}

// ── Quiz ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    YesNo,
    Number,
    /// Comma-separated list.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub kind: AnswerKind,
}

pub static QUIZ_QUESTIONS: [Question; 5] = [
    Question {
        key: "age",
        prompt: "How old are you?",
        kind: AnswerKind::Number,
    },
    Question {
        key: "heart_condition",
        prompt: "Do you have a heart condition?",
        kind: AnswerKind::YesNo,
    },
    Question {
        key: "psychosis_history",
        prompt: "Do you have a personal or family history of psychosis?",
        kind: AnswerKind::YesNo,
    },
    Question {
        key: "bipolar_disorder",
        prompt: "Have you been diagnosed with bipolar disorder?",
        kind: AnswerKind::YesNo,
    },
    Question {
        key: "medications",
        prompt: "List any medications you currently take (comma-separated, blank for none).",
        kind: AnswerKind::List,
    },
];

/// Form-based pre-screen. Answers are collected locally and submitted in one
/// request.
#[derive(Debug, Clone)]
pub struct PreScreenQuiz {
    protocol_id: i64,
    responses: BTreeMap<String, Value>,
    result: Option<PreScreeningResult>,
    error: Option<String>,
}

impl PreScreenQuiz {
    pub fn new(protocol_id: i64) -> Self {
        Self {
            protocol_id,
            responses: BTreeMap::new(),
            result: None,
            error: None,
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        &QUIZ_QUESTIONS
    }

    pub fn responses(&self) -> &BTreeMap<String, Value> {
        &self.responses
    }

    pub fn result(&self) -> Option<&PreScreeningResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record a raw text answer, converted according to the question's kind.
    pub fn answer(&mut self, key: &str, raw: &str) -> Result<(), ScreeningError> {
        let question = QUIZ_QUESTIONS
            .iter()
            .find(|q| q.key == key)
            .ok_or_else(|| ScreeningError::InvalidAnswer {
                question: key.to_string(),
                reason: "unknown question".to_string(),
            })?;
        let value = parse_answer(question, raw.trim())?;
        self.responses.insert(key.to_string(), value);
        Ok(())
    }

    pub fn unanswered(&self) -> Vec<&'static Question> {
        QUIZ_QUESTIONS
            .iter()
            .filter(|q| !self.responses.contains_key(q.key))
            .collect()
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        for question in self.unanswered() {
            errors.add(question.key, "This field is required");
        }
        errors.into_result()
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<&PreScreeningResult, ScreeningError> {
        self.validate().map_err(ScreeningError::Incomplete)?;
        self.error = None;

        match patients::pre_screen(api, self.protocol_id, self.responses.clone()).await {
            Ok(result) => {
                info!(
                    protocol_id = self.protocol_id,
                    eligible = result.eligible,
                    risk_level = result.risk_level.as_str(),
                    "pre-screen submitted"
                );
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }
}

fn parse_answer(question: &Question, raw: &str) -> Result<Value, ScreeningError> {
    let invalid = |reason: &str| ScreeningError::InvalidAnswer {
        question: question.key.to_string(),
        reason: reason.to_string(),
    };

    match question.kind {
        AnswerKind::YesNo => match raw.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Ok(Value::Bool(true)),
            "n" | "no" | "false" => Ok(Value::Bool(false)),
            _ => Err(invalid("answer yes or no")),
        },
        AnswerKind::Number => raw
            .parse::<u32>()
            .map(Value::from)
            .map_err(|_| invalid("enter a whole number")),
        AnswerKind::List => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )),
    }
}
