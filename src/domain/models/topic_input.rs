#[cfg(test)]
#[path = "topic_input_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Widget;
use tui_textarea::Input;
use tui_textarea::Key;
use tui_textarea::TextArea;

pub const MAX_TOPIC_LENGTH: usize = 60;

/// Single line text box for typing a custom quiz topic.
pub struct TopicInput<'a> {
    textarea: TextArea<'a>,
    focused: bool,
}

impl<'a> Default for TopicInput<'a> {
    fn default() -> TopicInput<'a> {
        let mut input = TopicInput {
            textarea: TextArea::default(),
            focused: false,
        };
        input.refresh_block();

        return input;
    }
}

impl<'a> TopicInput<'a> {
    pub fn len(&self) -> usize {
        return self.textarea.lines().join("").chars().count();
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    /// The typed topic, trimmed.
    pub fn topic(&self) -> String {
        return self.textarea.lines().join(" ").trim().to_string();
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.refresh_block();
        }
    }

    /// Applies a key press. Line breaks are dropped and characters past
    /// `MAX_TOPIC_LENGTH` are ignored.
    pub fn input(&mut self, input: Input) {
        match input {
            Input {
                key: Key::Enter, ..
            }
            | Input {
                key: Key::Char('m' | 'j'),
                ctrl: true,
                ..
            } => {
                return;
            }
            Input {
                key: Key::Char(char),
                ctrl: false,
                ..
            } => {
                self.insert(char);
            }
            input => {
                self.textarea.input(input);
            }
        }

        self.refresh_block();
    }

    pub fn paste(&mut self, text: &str) {
        for char in text.chars() {
            self.insert(char);
        }

        self.refresh_block();
    }

    fn insert(&mut self, char: char) {
        if char.is_control() || self.len() >= MAX_TOPIC_LENGTH {
            return;
        }

        self.textarea.insert_char(char);
    }

    fn refresh_block(&mut self) {
        let mut border_style = Style::default();
        if self.focused {
            border_style = border_style.fg(Color::Cyan);
        }

        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(border_style)
                .title(format!("Custom topic ({}/{MAX_TOPIC_LENGTH})", self.len()))
                .padding(Padding::new(1, 1, 0, 0)),
        );
    }

    pub fn widget(&self) -> impl Widget + '_ {
        return self.textarea.widget();
    }
}
