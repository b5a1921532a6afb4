use ratatui::style::{Color, Modifier, Style};

use crate::core::config::Appearance;
use crate::render::markdown::HighlightClass;

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub system_text_style: Style,

    // Markdown
    pub heading_style: Style,
    pub quote_style: Style,
    pub list_marker_style: Style,
    pub inline_code_style: Style,
    pub code_block_style: Style,
    pub syntax: SyntaxColors,

    // Chrome
    pub title_style: Style,
    pub streaming_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub input_disabled_style: Style,
}

/// Foreground colors for highlighted code tokens.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxColors {
    pub keyword: Color,
    pub function: Color,
    pub class: Color,
    pub builtin: Color,
    pub number: Color,
    pub decorator: Color,
    pub string: Color,
    pub comment: Color,
}

impl SyntaxColors {
    pub fn color(&self, class: HighlightClass) -> Color {
        match class {
            HighlightClass::Keyword => self.keyword,
            HighlightClass::Function => self.function,
            HighlightClass::Class => self.class,
            HighlightClass::Builtin => self.builtin,
            HighlightClass::Number => self.number,
            HighlightClass::Decorator => self.decorator,
            HighlightClass::String => self.string,
            HighlightClass::Comment => self.comment,
        }
    }
}

impl Theme {
    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Self::dark_default(),
            Appearance::Light => Self::light(),
        }
    }

    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            system_text_style: Style::default().fg(Color::DarkGray),

            heading_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            quote_style: Style::default().fg(Color::Gray),
            list_marker_style: Style::default().fg(Color::Yellow),
            inline_code_style: Style::default().fg(Color::LightYellow),
            code_block_style: Style::default().fg(Color::Gray),
            syntax: SyntaxColors {
                keyword: Color::Rgb(198, 120, 221),
                function: Color::Rgb(97, 175, 239),
                class: Color::Rgb(229, 192, 123),
                builtin: Color::Rgb(86, 182, 194),
                number: Color::Rgb(209, 154, 102),
                decorator: Color::Rgb(224, 108, 117),
                string: Color::Rgb(152, 195, 121),
                comment: Color::Rgb(127, 132, 142),
            },

            title_style: Style::default().fg(Color::Gray),
            streaming_indicator_style: Style::default().fg(Color::White),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_disabled_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_text_style: Style::default().fg(Color::Black),
            system_text_style: Style::default().fg(Color::Gray),

            heading_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            quote_style: Style::default().fg(Color::DarkGray),
            list_marker_style: Style::default().fg(Color::Magenta),
            inline_code_style: Style::default().fg(Color::Red),
            code_block_style: Style::default().fg(Color::Black),
            syntax: SyntaxColors {
                keyword: Color::Rgb(166, 38, 164),
                function: Color::Rgb(64, 120, 242),
                class: Color::Rgb(193, 132, 1),
                builtin: Color::Rgb(1, 132, 188),
                number: Color::Rgb(152, 104, 1),
                decorator: Color::Rgb(228, 86, 73),
                string: Color::Rgb(80, 161, 79),
                comment: Color::Rgb(160, 161, 167),
            },

            title_style: Style::default().fg(Color::DarkGray),
            streaming_indicator_style: Style::default().fg(Color::Black),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_disabled_style: Style::default().fg(Color::Gray),
        }
    }

    pub fn syntax_style(&self, class: HighlightClass) -> Style {
        let style = self.code_block_style.fg(self.syntax.color(class));
        if class == HighlightClass::Comment {
            style.add_modifier(Modifier::ITALIC)
        } else {
            style
        }
    }
}
