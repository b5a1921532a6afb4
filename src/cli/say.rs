//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};

use tokio_util::sync::CancellationToken;

use crate::api::ChatRequest;
use crate::core::chat_stream::{stream_reply, StreamMessage};
use crate::core::constants::SEND_FAILURE_MESSAGE;
use crate::render::markdown::{render_markdown, RenderOptions};

/// Turns cumulative snapshots into the text not printed yet.
#[derive(Debug, Default)]
pub struct SnapshotPrinter {
    printed: String,
}

impl SnapshotPrinter {
    /// Text to append for `snapshot`. A snapshot that does not extend what
    /// was printed starts over on a fresh line.
    pub fn delta(&mut self, snapshot: &str) -> String {
        let out = match snapshot.strip_prefix(self.printed.as_str()) {
            Some(rest) => rest.to_string(),
            None => format!("\n{snapshot}"),
        };
        self.printed = snapshot.to_string();
        out
    }

    pub fn text(&self) -> &str {
        &self.printed
    }
}

pub async fn run_say(
    client: &reqwest::Client,
    base_url: &str,
    model_name: &str,
    prompt: Vec<String>,
    html: Option<RenderOptions>,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: sparkle say <prompt>");
        std::process::exit(1);
    }

    let request = ChatRequest {
        message: prompt,
        model_name: model_name.to_string(),
    };

    let mut printer = SnapshotPrinter::default();
    let mut stdout = io::stdout();
    let streamed = stream_reply(
        client,
        base_url,
        &request,
        &CancellationToken::new(),
        |message| {
            if let StreamMessage::Content(snapshot) = message {
                let delta = printer.delta(&snapshot);
                if html.is_none() {
                    let _ = write!(stdout, "{delta}");
                    let _ = stdout.flush();
                }
            }
        },
    )
    .await;

    if let Err(err) = streamed {
        eprintln!("\n❌ {SEND_FAILURE_MESSAGE} ({err})");
        std::process::exit(1);
    }

    match html {
        Some(options) => println!("{}", render_markdown(printer.text(), &options)),
        None => println!(),
    }

    Ok(())
}
