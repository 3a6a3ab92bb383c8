use serde::{Deserialize, Serialize};

//
// ─── CHAT TURNS ────────────────────────────────────────────────────────────────
//

/// Who produced a turn in the conversation.
///
/// `Error` marks a user turn whose request failed; the turn stays visible
/// in the transcript but is never sent back to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Error,
}

/// One entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
