//! State of the interactive chat screen.

use std::path::PathBuf;
use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Line;
use tracing::warn;
use tui_textarea::{Input, TextArea};

use crate::core::chat_stream::StreamParams;
use crate::core::config::Appearance;
use crate::core::conversation::SendRejected;
use crate::core::session::ChatSession;
use crate::render::markdown::RenderOptions;
use crate::render::page::export_transcript;
use crate::ui::markdown::{render_message, MessageRenderConfig};
use crate::ui::theme::Theme;

/// Everything the chat screen needs besides the session itself.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub appearance: Appearance,
    pub markdown: bool,
    pub syntax: bool,
    pub html: RenderOptions,
    pub html_export: Option<PathBuf>,
}

/// What the event loop has to do after a key press.
pub enum KeyOutcome {
    Ignored,
    Redraw,
    Send(StreamParams),
    Reset,
    Quit,
}

pub struct App {
    pub session: ChatSession,
    pub theme: Theme,
    pub options: ChatOptions,
    pub textarea: TextArea<'static>,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub pulse_start: Instant,
    pub status: Option<String>,
}

impl App {
    pub fn new(session: ChatSession, options: ChatOptions) -> Self {
        let theme = Theme::for_appearance(options.appearance);
        let mut app = Self {
            session,
            theme,
            options,
            textarea: TextArea::default(),
            scroll_offset: 0,
            auto_scroll: true,
            pulse_start: Instant::now(),
            status: None,
        };
        app.configure_textarea();
        app
    }

    fn configure_textarea(&mut self) {
        self.textarea.set_style(self.theme.input_text_style);
        self.textarea.set_cursor_style(self.theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(ratatui::style::Style::default());
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.configure_textarea();
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn build_display_lines(&self) -> Vec<Line<'static>> {
        let config = MessageRenderConfig::markdown(self.options.markdown, self.options.syntax);
        self.session
            .conversation()
            .messages()
            .iter()
            .flat_map(|message| render_message(message, &self.theme, config))
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => KeyOutcome::Quit,
            KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Char('r') if ctrl => {
                if self.session.is_resetting() {
                    return KeyOutcome::Ignored;
                }
                self.session.begin_reset();
                self.status = Some("Resetting conversation...".to_string());
                KeyOutcome::Reset
            }
            KeyCode::PageUp => {
                self.auto_scroll = false;
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                KeyOutcome::Redraw
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                KeyOutcome::Redraw
            }
            KeyCode::End if ctrl => {
                self.auto_scroll = true;
                KeyOutcome::Redraw
            }
            _ if self.is_busy() => KeyOutcome::Ignored,
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                self.textarea.insert_newline();
                KeyOutcome::Redraw
            }
            KeyCode::Enter => self.submit(),
            _ => {
                if self.textarea.input(Input::from(key)) {
                    KeyOutcome::Redraw
                } else {
                    KeyOutcome::Ignored
                }
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) -> bool {
        if self.is_busy() {
            return false;
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.textarea.insert_str(normalized)
    }

    fn submit(&mut self) -> KeyOutcome {
        let text = self.input_text();
        match self.session.prepare_send(&text) {
            Ok(params) => {
                self.clear_input();
                self.auto_scroll = true;
                self.pulse_start = Instant::now();
                self.status = None;
                KeyOutcome::Send(params)
            }
            Err(SendRejected::EmptyInput) => KeyOutcome::Ignored,
            Err(SendRejected::RequestInFlight) => {
                self.status = Some("Waiting for the current reply".to_string());
                KeyOutcome::Redraw
            }
        }
    }

    /// Rewrite the HTML transcript, when one was requested.
    pub fn export_html(&self) {
        let Some(path) = &self.options.html_export else {
            return;
        };
        if let Err(err) = export_transcript(
            path,
            self.session.conversation().messages(),
            self.options.appearance,
            &self.options.html,
        ) {
            warn!(path = %path.display(), error = %err, "Transcript export failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat_stream::StreamMessage;
    use crate::core::message::Role;
    use crate::utils::test_utils::{offline_session, roles};
    use tempfile::TempDir;

    fn options() -> ChatOptions {
        ChatOptions {
            appearance: Appearance::Dark,
            markdown: true,
            syntax: true,
            html: RenderOptions::default(),
            html_export: None,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_sends_and_clears_the_input() {
        let mut app = App::new(offline_session(), options());
        type_text(&mut app, "hi");

        let outcome = app.handle_key(key(KeyCode::Enter));
        let KeyOutcome::Send(params) = outcome else {
            panic!("expected a send");
        };
        assert_eq!(params.message, "hi");
        assert_eq!(app.input_text(), "");
        assert_eq!(roles(&app.session), vec![Role::User, Role::Assistant]);
    }

    #[test]
    fn shift_enter_inserts_a_newline() {
        let mut app = App::new(offline_session(), options());
        type_text(&mut app, "a");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_text(&mut app, "b");
        assert_eq!(app.input_text(), "a\nb");
        assert!(app.session.conversation().is_empty());
    }

    #[test]
    fn whitespace_input_is_not_sent() {
        let mut app = App::new(offline_session(), options());
        type_text(&mut app, "   ");
        assert!(matches!(
            app.handle_key(key(KeyCode::Enter)),
            KeyOutcome::Ignored
        ));
        assert!(app.session.conversation().is_empty());
    }

    #[test]
    fn typing_is_ignored_while_a_reply_streams() {
        let mut app = App::new(offline_session(), options());
        type_text(&mut app, "first");
        app.handle_key(key(KeyCode::Enter));

        type_text(&mut app, "second");
        assert_eq!(app.input_text(), "");
        assert!(matches!(
            app.handle_key(key(KeyCode::Enter)),
            KeyOutcome::Ignored
        ));
        assert_eq!(app.session.conversation().len(), 2);
    }

    #[test]
    fn ctrl_r_starts_a_reset_once() {
        let mut app = App::new(offline_session(), options());
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(matches!(app.handle_key(ctrl_r), KeyOutcome::Reset));
        assert!(app.session.is_resetting());
        assert!(matches!(app.handle_key(ctrl_r), KeyOutcome::Ignored));
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(offline_session(), options());
        assert!(matches!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyOutcome::Quit
        ));
        assert!(matches!(app.handle_key(key(KeyCode::Esc)), KeyOutcome::Quit));
    }

    #[test]
    fn export_follows_the_conversation() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("chat.html");
        let mut app = App::new(
            offline_session(),
            ChatOptions {
                html_export: Some(path.clone()),
                ..options()
            },
        );
        type_text(&mut app, "hi");
        let KeyOutcome::Send(params) = app.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a send");
        };
        app.session
            .apply(StreamMessage::Content("*hello*".into()), params.stream_id);
        app.export_html();

        let page = std::fs::read_to_string(&path).expect("read export");
        assert!(page.contains("<p><em>hello</em></p>"));
    }
}
