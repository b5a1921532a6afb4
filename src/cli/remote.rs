//! One-shot calls to the service: `reset` and `history`.

use std::error::Error;

use crate::api::HistoryEntry;
use crate::core::chat_stream::{fetch_history, reset_remote};

pub async fn run_reset(client: &reqwest::Client, base_url: &str) -> Result<(), Box<dyn Error>> {
    if let Err(err) = reset_remote(client, base_url).await {
        eprintln!("❌ Reset failed: {err}");
        std::process::exit(1);
    }
    println!("✅ Conversation reset");
    Ok(())
}

pub async fn run_history(client: &reqwest::Client, base_url: &str) -> Result<(), Box<dyn Error>> {
    let history = match fetch_history(client, base_url).await {
        Ok(history) => history,
        Err(err) => {
            eprintln!("❌ Could not load history: {err}");
            std::process::exit(1);
        }
    };

    if history.history.is_empty() {
        println!("(no messages)");
        return Ok(());
    }
    for line in format_history(&history.history) {
        println!("{line}");
    }
    Ok(())
}

fn format_history(entries: &[HistoryEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{}:", entry.role));
        lines.extend(entry.content.lines().map(|line| format!("  {line}")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entries_are_indented_under_their_role() {
        let entries = vec![
            HistoryEntry {
                role: "user".into(),
                content: "hi".into(),
            },
            HistoryEntry {
                role: "model".into(),
                content: "hello\nthere".into(),
            },
        ];
        assert_eq!(
            format_history(&entries),
            vec!["user:", "  hi", "", "model:", "  hello", "  there"]
        );
    }
}
