//! Conversation state and the submit flow.
//!
//! One `ChatSession` exists per chat view. It owns the turn history and the
//! single-in-flight gate; nothing here lives in module globals. The session
//! mutations are all synchronous so a UI can hold them in a signal and only
//! await the network step in between.

use std::sync::Arc;

use tracing::debug;

use coach_core::model::{AttachmentDraft, ChatTurn, Role, StudySet};

use crate::client::CoachBackend;
use crate::error::CoachError;
use crate::response::parse_reply;

/// Substituted when the user submits an attachment with no text.
pub const DEFAULT_ATTACHMENT_MESSAGE: &str = "Create flashcards from my notes";

//
// ─── CHAT SESSION ──────────────────────────────────────────────────────────────
//

/// A submission accepted by [`ChatSession::prepare_submit`]: the resolved
/// message plus the history snapshot to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmit {
    pub message: String,
    pub history: Vec<ChatTurn>,
}

/// Append-only conversation history for one chat view.
///
/// Turns are never mutated after append, with one exception: a failed
/// request relabels its own user turn to `Error`, which keeps it visible
/// in the transcript but drops it from outbound history.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    waiting: bool,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// True while a request is in flight. New submissions are rejected,
    /// not queued.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// History as sent to the backend: every turn except errors.
    #[must_use]
    pub fn outbound_history(&self) -> Vec<ChatTurn> {
        self.turns
            .iter()
            .filter(|turn| turn.role != Role::Error)
            .cloned()
            .collect()
    }

    /// Accept a submission: snapshot the outbound history, append the user
    /// turn, and raise the waiting gate. The snapshot excludes the new
    /// message, which travels in its own request field.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Busy` while a request is already in flight; the
    /// session is left untouched.
    pub fn prepare_submit(
        &mut self,
        message: &str,
        has_attachment: bool,
    ) -> Result<PreparedSubmit, CoachError> {
        if self.waiting {
            return Err(CoachError::Busy);
        }
        let message = resolve_message(message, has_attachment);
        let history = self.outbound_history();
        self.turns.push(ChatTurn::user(message.clone()));
        self.waiting = true;
        Ok(PreparedSubmit { message, history })
    }

    /// Record a successful reply and drop the waiting gate.
    pub fn complete(&mut self, reply: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(reply));
        self.waiting = false;
    }

    /// Record a failed request: relabel the pending user turn to `Error`
    /// so it drops out of subsequent context, and drop the waiting gate.
    pub fn fail(&mut self) {
        if self.waiting
            && let Some(turn) = self.turns.last_mut()
        {
            turn.role = Role::Error;
        }
        self.waiting = false;
    }

    /// Wipe the conversation. Callers gate this behind a confirmation when
    /// the history is non-empty.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.waiting = false;
    }
}

fn resolve_message(message: &str, has_attachment: bool) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() && has_attachment {
        DEFAULT_ATTACHMENT_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// User-visible text for a failed request, by failure class.
#[must_use]
pub fn failure_message(err: &CoachError) -> String {
    match err {
        CoachError::Busy => "Hold on, I'm still working on your last message.".to_string(),
        CoachError::Transport(_) => "I couldn't reach the coach backend. Make sure the \
             server is running, then send your message again."
            .to_string(),
        CoachError::Backend {
            message: Some(text),
            ..
        } => text.clone(),
        _ => "Something went wrong while talking to the coach. Please try again.".to_string(),
    }
}

//
// ─── COACH SERVICE ─────────────────────────────────────────────────────────────
//

/// Backend-facing operations shared by the chat views.
#[derive(Clone)]
pub struct CoachService {
    backend: Arc<dyn CoachBackend>,
}

impl CoachService {
    #[must_use]
    pub fn new(backend: Arc<dyn CoachBackend>) -> Self {
        Self { backend }
    }

    /// Send a prepared submission.
    ///
    /// # Errors
    ///
    /// Propagates the backend's `CoachError`; the caller records it on the
    /// session via [`ChatSession::fail`].
    pub async fn send(
        &self,
        prepared: &PreparedSubmit,
        attachment: Option<&AttachmentDraft>,
    ) -> Result<String, CoachError> {
        self.backend
            .send(&prepared.message, &prepared.history, attachment)
            .await
    }

    /// Fetch a fresh batch of study sets for an exhausted card list. The
    /// request does not join the conversation history, and every failure
    /// path degrades to the mock catalog.
    pub async fn fetch_more_sets(&self, topic: &str, history: &[ChatTurn]) -> Vec<StudySet> {
        let message = format!("Show me more study sets about {topic}");
        match self.backend.send(&message, history, None).await {
            Ok(reply) => {
                debug!(topic, "see-more refetch succeeded");
                parse_reply(&reply)
                    .sets
                    .unwrap_or_else(crate::mock::mock_catalog)
            }
            Err(err) => {
                tracing::warn!(%err, topic, "see-more refetch failed, serving mock catalog");
                crate::mock::mock_catalog()
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_snapshots_history_without_the_new_turn() {
        let mut session = ChatSession::new();
        session.complete("Welcome back!");

        let prepared = session.prepare_submit("Help me cram", false).unwrap();
        assert_eq!(prepared.message, "Help me cram");
        assert_eq!(prepared.history.len(), 1);
        assert_eq!(session.turns().len(), 2);
        assert!(session.is_waiting());
    }

    #[test]
    fn busy_session_rejects_without_mutation() {
        let mut session = ChatSession::new();
        session.prepare_submit("first", false).unwrap();
        let err = session.prepare_submit("second", false).unwrap_err();
        assert!(matches!(err, CoachError::Busy));
        assert_eq!(session.turns().len(), 1);
    }

    #[test]
    fn attachment_only_submission_gets_default_message() {
        let mut session = ChatSession::new();
        let prepared = session.prepare_submit("   ", true).unwrap();
        assert_eq!(prepared.message, DEFAULT_ATTACHMENT_MESSAGE);
    }

    #[test]
    fn outbound_history_excludes_error_turns() {
        let mut session = ChatSession::new();
        session.prepare_submit("Help me cram", false).unwrap();
        session.fail();
        session.prepare_submit("try again", false).unwrap();
        session.complete("What are you cramming for?");

        let outbound = session.outbound_history();
        assert_eq!(outbound.len(), 2);
        assert!(outbound.iter().all(|turn| turn.role != Role::Error));
        // The relabeled turn still shows in the transcript.
        assert_eq!(session.turns().len(), 3);
    }

    #[test]
    fn failure_relabels_the_pending_user_turn() {
        let mut session = ChatSession::new();
        session.prepare_submit("this message failed", false).unwrap();
        session.fail();

        assert!(!session.is_waiting());
        let last = session.turns().last().unwrap();
        assert_eq!(last.role, Role::Error);
        assert_eq!(last.content, "this message failed");
        // The failed message never travels in later context.
        assert!(
            session
                .outbound_history()
                .iter()
                .all(|turn| turn.content != "this message failed")
        );
    }

    #[test]
    fn failure_without_a_pending_request_changes_nothing() {
        let mut session = ChatSession::new();
        session.complete("Welcome back!");
        session.fail();
        assert_eq!(session.turns()[0].role, Role::Assistant);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = ChatSession::new();
        session.prepare_submit("hi", false).unwrap();
        session.reset();
        assert!(session.is_empty());
        assert!(!session.is_waiting());
    }

    #[test]
    fn cram_scenario_round_trip() {
        let mut session = ChatSession::new();
        let prepared = session.prepare_submit("Help me cram", false).unwrap();
        assert_eq!(prepared.history.len(), 0);
        session.complete("What are you cramming for?");
        assert_eq!(session.turns().len(), 2);
        assert_eq!(session.turns()[0].role, Role::User);
        assert_eq!(session.turns()[1].role, Role::Assistant);
    }
}
