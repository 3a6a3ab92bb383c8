#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod mock;
pub mod response;
pub mod session;

pub use client::{CoachBackend, CoachClient};
pub use error::CoachError;
pub use mock::mock_catalog;
pub use response::{
    FALLBACK_TOPIC, ParsedReply, extract_draft_topic, parse_reply, reconstruct_topic,
};
pub use session::{
    ChatSession, CoachService, DEFAULT_ATTACHMENT_MESSAGE, PreparedSubmit, failure_message,
};
