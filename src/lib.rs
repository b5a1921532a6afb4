//! Sparkle Chat is a terminal client for a streaming chat service.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation, the reply-stream decoder, and the HTTP
//!   calls to the service.
//! - [`render`] turns assistant replies into HTML (markdown pipeline and
//!   code highlighting) and writes transcript pages.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`cli`] parses arguments and dispatches the one-shot commands.
//! - [`api`] defines the payloads exchanged with the service.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod render;
pub mod ui;
pub mod utils;
