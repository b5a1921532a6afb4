//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod remote;
pub mod say;
pub mod settings;

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::remote::{run_history, run_reset};
use crate::cli::say::run_say;
use crate::cli::settings::{SettingError, SettingRegistry};
use crate::core::config::Config;
use crate::core::constants::VERSION;
use crate::core::session::ChatSession;
use crate::render::markdown::{render_markdown, RenderOptions};
use crate::ui::app::ChatOptions;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogDestination};
use crate::utils::url::validate_base_url;

#[derive(Parser)]
#[command(name = "sparkle")]
#[command(version = VERSION)]
#[command(about = "A terminal client for a streaming chat service")]
#[command(
    long_about = "Sparkle Chat is a full-screen terminal chat client. Replies stream in as they \
are generated and are rendered as markdown, with highlighting for Python and JavaScript code.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Shift+Enter       Insert a new line (Alt+Enter also works)\n\
  PageUp/PageDown   Scroll through the conversation\n\
  Ctrl+R            Reset the conversation on both sides\n\
  Ctrl+C / Esc      Quit the application\n\n\
Logging:\n\
  RUST_LOG selects what is logged; the chat screen only logs with --log-file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the chat service for this run
    #[arg(short = 'u', long = "url", global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Model name to request for this run
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat {
        /// Keep an HTML copy of the conversation at this path
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,
    },
    /// Send one message and print the streamed reply
    Say {
        /// Print the finished reply rendered as HTML
        #[arg(long)]
        html: bool,
        /// The message to send
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Render markdown from a file (or stdin) to HTML
    Render {
        /// Markdown file to read; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Clear the conversation kept by the service
    Reset,
    /// Print the conversation kept by the service
    History,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Show the current configuration
    Config,
}

impl Commands {
    fn is_interactive(&self) -> bool {
        matches!(self, Commands::Chat { .. })
    }
}

/// Connection settings after command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub base_url: String,
    pub model_name: String,
}

impl Connection {
    pub fn resolve(
        url: Option<&str>,
        model: Option<&str>,
        config: &Config,
    ) -> Result<Self, Box<dyn Error>> {
        let base_url = validate_base_url(url.unwrap_or(config.base_url()))?;
        let model_name = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(config.model_name())
            .to_string();
        Ok(Self {
            base_url,
            model_name,
        })
    }
}

fn render_options(config: &Config) -> RenderOptions {
    RenderOptions::default()
        .with_raw_html(config.raw_html())
        .with_highlight(config.syntax())
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat { html: None });

    init_tracing(&LogDestination::choose(
        args.log_file.clone(),
        command.is_interactive(),
    ))?;

    let config = Config::load()?;

    match command {
        Commands::Set { key, value } => {
            let registry = SettingRegistry::new();
            let mut config = config;
            let result = registry
                .get(&key)
                .and_then(|handler| handler.set(&value, &mut config));
            finish_setting(result, &config)
        }
        Commands::Unset { key } => {
            let registry = SettingRegistry::new();
            let mut config = config;
            let result = registry
                .get(&key)
                .map(|handler| handler.unset(&mut config));
            finish_setting(result, &config)
        }
        Commands::Config => {
            println!("Current configuration:");
            for line in SettingRegistry::new().describe(&config) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Render { file } => {
            let markdown = match file {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut input = String::new();
                    io::stdin().read_to_string(&mut input)?;
                    input
                }
            };
            println!("{}", render_markdown(&markdown, &render_options(&config)));
            Ok(())
        }
        Commands::Chat { html } => {
            let (client, connection) = connect(args.url.as_deref(), args.model.as_deref(), &config);
            let session = ChatSession::new(client, connection.base_url, connection.model_name);
            let options = ChatOptions {
                appearance: config.appearance(),
                markdown: config.markdown(),
                syntax: config.syntax(),
                html: render_options(&config),
                html_export: html,
            };
            run_chat(session, options).await
        }
        Commands::Say { html, prompt } => {
            let (client, connection) = connect(args.url.as_deref(), args.model.as_deref(), &config);
            let html = html.then(|| render_options(&config));
            run_say(
                &client,
                &connection.base_url,
                &connection.model_name,
                prompt,
                html,
            )
            .await
        }
        Commands::Reset => {
            let (client, connection) = connect(args.url.as_deref(), args.model.as_deref(), &config);
            run_reset(&client, &connection.base_url).await
        }
        Commands::History => {
            let (client, connection) = connect(args.url.as_deref(), args.model.as_deref(), &config);
            run_history(&client, &connection.base_url).await
        }
    }
}

/// HTTP client plus resolved connection settings. Exits on a bad URL.
fn connect(url: Option<&str>, model: Option<&str>, config: &Config) -> (reqwest::Client, Connection) {
    match Connection::resolve(url, model, config) {
        Ok(connection) => (reqwest::Client::new(), connection),
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}

fn finish_setting(
    result: Result<String, SettingError>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let saved = result.and_then(|message| {
        config
            .save()
            .map_err(|e| SettingError::SaveFailed(e.to_string()))?;
        Ok(message)
    });
    match saved {
        Ok(message) => {
            println!("{message}");
            Ok(())
        }
        Err(err) => {
            err.print();
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests;
