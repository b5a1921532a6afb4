//! Chat session: the conversation plus the request bookkeeping around it.
//!
//! The session is the only writer of the conversation. Stream tasks report
//! back through [`ChatSession::apply`], tagged with the id of the stream that
//! produced them, so events from a stream that was cancelled by a reset are
//! dropped instead of landing in the next exchange.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::chat_stream::{StreamError, StreamMessage, StreamParams};
use crate::core::constants::SEND_FAILURE_MESSAGE;
use crate::core::conversation::{Conversation, SendRejected};

pub struct ChatSession {
    client: reqwest::Client,
    base_url: String,
    model_name: String,
    conversation: Conversation,
    current_stream_id: u64,
    cancel_token: Option<CancellationToken>,
    reset_pending: bool,
}

impl ChatSession {
    pub fn new(client: reqwest::Client, base_url: String, model_name: String) -> Self {
        Self {
            client,
            base_url,
            model_name,
            conversation: Conversation::new(),
            current_stream_id: 0,
            cancel_token: None,
            reset_pending: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn current_stream_id(&self) -> u64 {
        self.current_stream_id
    }

    /// True while input should stay disabled.
    pub fn is_busy(&self) -> bool {
        self.conversation.is_busy() || self.reset_pending
    }

    pub fn is_resetting(&self) -> bool {
        self.reset_pending
    }

    /// Record the user's message and an assistant placeholder, and hand back
    /// the parameters for the stream task that will fill the placeholder.
    pub fn prepare_send(&mut self, text: &str) -> Result<StreamParams, SendRejected> {
        if self.reset_pending {
            return Err(SendRejected::RequestInFlight);
        }
        self.conversation.begin_exchange(text)?;

        self.current_stream_id += 1;
        let cancel_token = CancellationToken::new();
        self.cancel_token = Some(cancel_token.clone());

        Ok(StreamParams {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            model_name: self.model_name.clone(),
            message: text.to_string(),
            cancel_token,
            stream_id: self.current_stream_id,
        })
    }

    /// Fold one stream message into the conversation. Returns true when the
    /// visible state changed.
    pub fn apply(&mut self, message: StreamMessage, stream_id: u64) -> bool {
        if stream_id != self.current_stream_id {
            debug!(stream_id, current = self.current_stream_id, "Ignoring stale stream event");
            return false;
        }
        let Some(target) = self.conversation.in_flight().cloned() else {
            return false;
        };

        match message {
            StreamMessage::Content(snapshot) => self.conversation.set_content(&target, snapshot),
            // Already logged by the decoder; the reply keeps its last snapshot.
            StreamMessage::ServerError(_) => false,
            StreamMessage::Failed(err) => {
                warn!(error = %err, "Replacing reply with the failure notice");
                self.conversation.set_content(&target, SEND_FAILURE_MESSAGE)
            }
            StreamMessage::End => {
                self.conversation.finish();
                self.cancel_token = None;
                true
            }
        }
    }

    /// Stop the in-flight stream, if any. Its late events are dropped.
    pub fn cancel_stream(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        // Bumping the id orphans anything the cancelled task already queued.
        self.current_stream_id += 1;
    }

    /// Stop the in-flight stream (if any) and refuse sends until
    /// [`ChatSession::complete_reset`] runs.
    pub fn begin_reset(&mut self) {
        self.cancel_stream();
        self.reset_pending = true;
    }

    /// Clear local state. The remote outcome is logged and otherwise ignored.
    pub fn complete_reset(&mut self, remote: Result<(), StreamError>) {
        if let Err(err) = remote {
            warn!(error = %err, "Remote conversation reset failed");
        }
        self.conversation.clear();
        self.reset_pending = false;
    }
}
