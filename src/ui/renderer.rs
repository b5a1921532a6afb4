use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::constants::VERSION;
use crate::ui::app::App;

const MAX_INPUT_LINES: u16 = 6;

pub fn ui(f: &mut Frame, app: &mut App) {
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_color)),
        f.area(),
    );

    let input_area_height = (app.textarea.lines().len() as u16).clamp(1, MAX_INPUT_LINES);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_area_height + 2), // +2 for borders
        ])
        .split(f.area());

    let lines = app.build_display_lines();

    // One row for the title
    let available_height = chunks[0].height.saturating_sub(1);
    let total_wrapped_lines = wrapped_line_count(&lines, chunks[0].width);
    let max_offset = total_wrapped_lines.saturating_sub(available_height);
    if app.auto_scroll || app.scroll_offset >= max_offset {
        app.auto_scroll = true;
        app.scroll_offset = max_offset;
    }

    let title = format!(
        "Sparkle Chat v{} - {} ({})",
        VERSION,
        app.session.model_name(),
        app.session.base_url()
    );

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(Span::styled(title, app.theme.title_style)))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    f.render_widget(messages_paragraph, chunks[0]);

    let (input_title, border_style) = if app.session.is_resetting() {
        ("Resetting...", app.theme.input_disabled_style)
    } else if app.is_busy() {
        ("Waiting for reply (Ctrl+R to reset, Ctrl+C to quit)", app.theme.input_disabled_style)
    } else {
        (
            "Type your message (Enter to send, Shift+Enter for new line, Ctrl+R to reset, Ctrl+C to quit)",
            app.theme.input_border_style,
        )
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(input_title, app.theme.input_title_style));

    if app.is_busy() {
        let indicator = pulse_symbol(app.pulse_start.elapsed().as_millis());
        block = block.title(
            Line::from(Span::styled(
                format!(" {indicator} "),
                app.theme.streaming_indicator_style,
            ))
            .right_aligned(),
        );
    } else if let Some(status) = &app.status {
        block = block.title_bottom(Span::styled(status.clone(), app.theme.system_text_style));
    }

    app.textarea.set_block(block);
    let text_style = if app.is_busy() {
        app.theme.input_disabled_style
    } else {
        app.theme.input_text_style
    };
    app.textarea.set_style(text_style);
    f.render_widget(&app.textarea, chunks[1]);
}

/// Rows needed to show `lines` at `width` columns, assuming character wrap.
pub fn wrapped_line_count(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| {
            let line_width: usize = line
                .spans
                .iter()
                .map(|span| UnicodeWidthStr::width(span.content.as_ref()))
                .sum();
            line_width.div_ceil(width).max(1)
        })
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Two pulses per second through three fill levels.
fn pulse_symbol(elapsed_millis: u128) -> &'static str {
    let phase = (elapsed_millis % 1000) as f32 / 500.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}
