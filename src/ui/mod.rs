//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the main loop that feeds key presses to [`app`] and
//!   stream updates to the session.
//! - [`renderer`] and [`markdown`]: frame layout and message lines.
//! - [`theme`]: colors for the dark and light appearances.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns the conversation and the network calls.

pub mod app;
pub mod chat_loop;
pub mod markdown;
pub mod renderer;
pub mod theme;
