//! Incremental decoder for the reply stream.
//!
//! Bytes arrive in arbitrary chunks. The decoder keeps two pieces of state
//! between chunks: a tail of undecoded bytes (an incomplete UTF-8 sequence)
//! and a tail of text that has not yet seen its record delimiter. Records
//! are separated by a blank line; within a record only `data: ` lines carry
//! payloads.

use memchr::memmem;
use tracing::{debug, error, warn};

use crate::api::StreamPayload;

const RECORD_DELIMITER: &str = "\n\n";
const DATA_PREFIX: &str = "data: ";

/// Content update produced by one payload line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Cumulative snapshot of the reply so far.
    Content(String),
    /// The service flagged an error. Reported for logging only.
    ServerError { content: Option<String> },
}

/// Where the decoder stands relative to the record framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Nothing buffered; the next byte starts a new record.
    AwaitingRecord,
    /// Part of a record is buffered, waiting for its delimiter.
    AwaitingLine,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    pending_bytes: Vec<u8>,
    buffer: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DecoderState {
        if self.buffer.is_empty() && self.pending_bytes.is_empty() {
            DecoderState::AwaitingRecord
        } else {
            DecoderState::AwaitingLine
        }
    }

    /// Feed one network chunk and collect the events of every record it
    /// completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.decode_chunk(chunk);

        let mut events = Vec::new();
        let finder = memmem::Finder::new(RECORD_DELIMITER);
        let mut consumed = 0;
        while let Some(pos) = finder.find(&self.buffer.as_bytes()[consumed..]) {
            let end = consumed + pos;
            process_record(&self.buffer[consumed..end], &mut events);
            consumed = end + RECORD_DELIMITER.len();
        }
        self.buffer.drain(..consumed);

        events
    }

    /// End of stream. Whatever is still buffered never saw its delimiter
    /// and is dropped.
    pub fn finish(&mut self) {
        if self.state() == DecoderState::AwaitingLine {
            debug!(
                leftover_bytes = self.buffer.len() + self.pending_bytes.len(),
                "Discarding unterminated stream record"
            );
        }
        self.buffer.clear();
        self.pending_bytes.clear();
    }

    fn decode_chunk(&mut self, chunk: &[u8]) {
        self.pending_bytes.extend_from_slice(chunk);

        let mut rest: &[u8] = &self.pending_bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    rest = &[];
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    self.buffer
                        .push_str(std::str::from_utf8(&rest[..valid]).unwrap_or_default());
                    match err.error_len() {
                        Some(bad) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid + bad..];
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes.
                            rest = &rest[valid..];
                            break;
                        }
                    }
                }
            }
        }

        let keep = rest.len();
        let start = self.pending_bytes.len() - keep;
        self.pending_bytes.drain(..start);
    }
}

fn process_record(record: &str, events: &mut Vec<StreamEvent>) {
    for line in record.split('\n') {
        let Some(raw) = line.strip_prefix(DATA_PREFIX) else {
            continue;
        };
        let payload = raw.trim();
        if payload.is_empty() {
            continue;
        }
        handle_payload(payload, line, events);
    }
}

fn handle_payload(payload: &str, line: &str, events: &mut Vec<StreamEvent>) {
    let parsed = match serde_json::from_str::<StreamPayload>(payload) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, line = ?line, "Skipping malformed stream payload");
            return;
        }
    };

    if let Some(snapshot) = parsed.snapshot() {
        events.push(StreamEvent::Content(snapshot.to_string()));
    }

    if parsed.has_error() {
        let content = parsed.snapshot().map(str::to_owned);
        error!(content = ?content, "Server reported an error in the reply stream");
        events.push(StreamEvent::ServerError { content });
    }

    if parsed.is_done() {
        debug!("Server marked the reply as done");
    }
}
