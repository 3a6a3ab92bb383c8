use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;

use coach_core::model::{AttachmentDraft, ChatTurn};

use crate::error::CoachError;

/// Transport seam for the coach backend. The production implementation is
/// [`CoachClient`]; tests substitute a scripted stub.
#[async_trait]
pub trait CoachBackend: Send + Sync {
    /// Send one user message with the prior history, returning the raw
    /// assistant reply string.
    ///
    /// # Errors
    ///
    /// Returns `CoachError` on transport failure, a non-2xx status, or an
    /// empty reply body.
    async fn send(
        &self,
        message: &str,
        history: &[ChatTurn],
        attachment: Option<&AttachmentDraft>,
    ) -> Result<String, CoachError>;
}

/// HTTP client for the `/api/ai-coach` endpoint.
#[derive(Clone)]
pub struct CoachClient {
    client: Client,
    base_url: String,
}

impl CoachClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/api/ai-coach", self.base_url.trim_end_matches('/'))
    }

    async fn send_json(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<reqwest::Response, CoachError> {
        let payload = CoachRequest { message, history };
        Ok(self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await?)
    }

    async fn send_multipart(
        &self,
        message: &str,
        history: &[ChatTurn],
        attachment: &AttachmentDraft,
    ) -> Result<reqwest::Response, CoachError> {
        let history_json = serde_json::to_string(history)?;
        let file = Part::bytes(attachment.bytes.clone()).file_name(attachment.name.clone());
        let form = Form::new()
            .text("message", message.to_string())
            .text("history", history_json)
            .text("fileType", attachment.kind.as_str())
            .part("file", file);
        Ok(self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await?)
    }
}

#[async_trait]
impl CoachBackend for CoachClient {
    async fn send(
        &self,
        message: &str,
        history: &[ChatTurn],
        attachment: Option<&AttachmentDraft>,
    ) -> Result<String, CoachError> {
        debug!(
            history_len = history.len(),
            has_attachment = attachment.is_some(),
            "sending coach request"
        );

        let response = match attachment {
            Some(attachment) => self.send_multipart(message, history, attachment).await?,
            None => self.send_json(message, history).await?,
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(CoachError::Backend { status, message });
        }

        let body: CoachResponse = response.json().await?;
        if body.response.trim().is_empty() {
            return Err(CoachError::EmptyReply);
        }
        Ok(body.response)
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct CoachRequest<'a> {
    message: &'a str,
    history: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct CoachResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}
