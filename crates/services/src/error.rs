//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the coach backend client and submit flow.
///
/// Malformed study-set payloads and unmatched draft-topic patterns are
/// deliberately NOT represented here: those degrade silently to mock data
/// or a placeholder topic and never surface as errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoachError {
    #[error("a request is already in flight")]
    Busy,
    #[error("coach backend returned an empty reply")]
    EmptyReply,
    #[error("coach backend reported an error{}", message_suffix(.message))]
    Backend {
        status: reqwest::StatusCode,
        message: Option<String>,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("failed to encode request history")]
    Encode(#[from] serde_json::Error),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|text| format!(": {text}"))
        .unwrap_or_default()
}
