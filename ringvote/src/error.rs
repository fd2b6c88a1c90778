use crate::*;

use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("ringvote: malformed input: {0}")]
    MalformedInput(String),

    #[error("ringvote: the topic does not exist: {0}")]
    TopicNotFound(String),

    #[error("ringvote: no public key registered for voter {uid} under topic {topic}")]
    KeyNotFound { topic: String, uid: String },

    #[error("ringvote: no key ring exists for topic: {0}")]
    KeyRingNotFound(String),

    #[error("ringvote: topic {topic} is in stage {actual}, expected {expected}")]
    StageMismatch {
        topic: String,
        expected: Stage,
        actual: Stage,
    },

    #[error("ringvote: topic {topic} cannot move from {} to {to}", display_from(.from))]
    InvalidStageTransition {
        topic: String,
        from: Option<Stage>,
        to: Stage,
    },

    #[error("ringvote: key index references unregistered voter {uid} under topic {topic}")]
    UnknownVoter { topic: String, uid: String },

    #[error("ringvote: malformed ring signature: {0}")]
    MalformedSignature(String),

    #[error("ringvote: ring signature verification failed")]
    SignatureInvalid,

    #[error("ringvote: state store failure: {0}")]
    StorageFailure(String),
}

fn display_from(from: &Option<Stage>) -> String {
    match from {
        Some(stage) => stage.to_string(),
        None => String::from("unconfigured"),
    }
}
