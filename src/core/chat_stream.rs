use std::fmt;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{ChatRequest, HistoryResponse};
use crate::core::constants::{HISTORY_ENDPOINT, RESET_ENDPOINT, STREAM_ENDPOINT};
use crate::core::sse::{SseDecoder, StreamEvent};
use crate::utils::url::construct_api_url;

/// Terminal transport failure of a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The request could not be sent (connection refused, DNS, TLS...).
    Request(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// Reading the response body failed part way through.
    Body(String),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Request(msg) => write!(f, "request failed: {msg}"),
            StreamError::Status(code) => write!(f, "service answered with status {code}"),
            StreamError::Body(msg) => write!(f, "reading the reply stream failed: {msg}"),
        }
    }
}

impl std::error::Error for StreamError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamMessage {
    Content(String),
    ServerError(Option<String>),
    Failed(StreamError),
    End,
}

impl From<StreamEvent> for StreamMessage {
    fn from(event: StreamEvent) -> Self {
        match event {
            StreamEvent::Content(text) => StreamMessage::Content(text),
            StreamEvent::ServerError { content } => StreamMessage::ServerError(content),
        }
    }
}

pub struct StreamParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub model_name: String,
    pub message: String,
    pub cancel_token: CancellationToken,
    pub stream_id: u64,
}

#[derive(Clone)]
pub struct ChatStreamService {
    tx: mpsc::UnboundedSender<(StreamMessage, u64)>,
}

impl ChatStreamService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(StreamMessage, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Run one request on the runtime. Every stream ends with exactly one
    /// `End`, preceded by `Failed` when the transport broke, unless the
    /// cancel token fired first.
    pub fn spawn_stream(&self, params: StreamParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let cancel_token = params.cancel_token.clone();
            let stream_id = params.stream_id;
            tokio::select! {
                _ = run_stream(params, &tx) => {}
                _ = cancel_token.cancelled() => {
                    debug!(stream_id, "Reply stream cancelled");
                }
            }
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, message: StreamMessage, stream_id: u64) {
        let _ = self.tx.send((message, stream_id));
    }
}

async fn run_stream(params: StreamParams, tx: &mpsc::UnboundedSender<(StreamMessage, u64)>) {
    let StreamParams {
        client,
        base_url,
        model_name,
        message,
        cancel_token,
        stream_id,
    } = params;

    let request = ChatRequest {
        message,
        model_name,
    };

    if let Err(err) = stream_reply(&client, &base_url, &request, &cancel_token, |msg| {
        let _ = tx.send((msg, stream_id));
    })
    .await
    {
        warn!(stream_id, error = %err, "Reply stream failed");
        let _ = tx.send((StreamMessage::Failed(err), stream_id));
    }
    let _ = tx.send((StreamMessage::End, stream_id));
}

/// POST the message and forward every decoded event to `emit` as it
/// arrives. Returns once the server closes the stream.
pub async fn stream_reply<F>(
    client: &reqwest::Client,
    base_url: &str,
    request: &ChatRequest,
    cancel_token: &CancellationToken,
    mut emit: F,
) -> Result<(), StreamError>
where
    F: FnMut(StreamMessage),
{
    let url = construct_api_url(base_url, STREAM_ENDPOINT);
    debug!(url = %url, model = %request.model_name, "Sending chat request");

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .map_err(|e| StreamError::Request(e.to_string()))?;

    if !response.status().is_success() {
        return Err(StreamError::Status(response.status().as_u16()));
    }

    let mut decoder = SseDecoder::new();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        if cancel_token.is_cancelled() {
            return Ok(());
        }
        let bytes = chunk.map_err(|e| StreamError::Body(e.to_string()))?;
        for event in decoder.feed(&bytes) {
            emit(event.into());
        }
    }
    decoder.finish();

    Ok(())
}

/// Ask the service to forget its conversation. The response body is not
/// inspected.
pub async fn reset_remote(client: &reqwest::Client, base_url: &str) -> Result<(), StreamError> {
    let url = construct_api_url(base_url, RESET_ENDPOINT);
    let response = client
        .post(url)
        .send()
        .await
        .map_err(|e| StreamError::Request(e.to_string()))?;
    if !response.status().is_success() {
        return Err(StreamError::Status(response.status().as_u16()));
    }
    Ok(())
}

pub async fn fetch_history(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<HistoryResponse, StreamError> {
    let url = construct_api_url(base_url, HISTORY_ENDPOINT);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| StreamError::Request(e.to_string()))?;
    if !response.status().is_success() {
        return Err(StreamError::Status(response.status().as_u16()));
    }
    response
        .json::<HistoryResponse>()
        .await
        .map_err(|e| StreamError::Body(e.to_string()))
}
