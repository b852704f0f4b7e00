#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Backend;
use ratatui::Frame;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::views;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Screen;
use crate::domain::models::SessionState;
use crate::domain::models::TopicInput;
use crate::domain::models::ANSWERS_PER_QUESTION;

/// View state of the terminal UI. The quiz itself is only ever changed by
/// sending actions, this struct keeps cursors and the latest state snapshot.
///
/// `pending` is set once an action has been sent and cleared when the next
/// state arrives. Keys are ignored in between, as the snapshot they would be
/// judged against is stale.
pub struct AppState<'a> {
    pub answer_cursor: usize,
    pub custom_topic: TopicInput<'a>,
    pub last_topic: String,
    pub loading: Loading,
    pub pending: bool,
    pub state: SessionState,
    pub topics: Vec<String>,
    pub welcome_cursor: usize,
}

impl<'a> AppState<'a> {
    pub fn new(topics: Vec<String>, state: SessionState) -> AppState<'a> {
        return AppState {
            answer_cursor: 0,
            custom_topic: TopicInput::default(),
            last_topic: "".to_string(),
            loading: Loading::default(),
            pending: false,
            state,
            topics,
            welcome_cursor: 0,
        };
    }

    pub fn screen(&self) -> Screen {
        return Screen::from_state(&self.state);
    }

    fn custom_topic_selected(&self) -> bool {
        return self.welcome_cursor >= self.topics.len();
    }

    /// Starts a quiz on `topic`, used for the welcome screen and `--topic`.
    pub fn start_topic(&mut self, topic: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Ok(());
        }

        self.last_topic = topic.to_string();
        self.send(Action::LoadTopic(self.last_topic.to_string()), tx)?;

        return Ok(());
    }

    fn send(&mut self, action: Action, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        tx.send(action)?;
        self.pending = true;

        return Ok(());
    }

    /// Applies an event. Returns true when the application should exit.
    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        match event {
            Event::KeyboardCTRLC() => {
                return Ok(true);
            }
            Event::SessionChanged(state) => {
                self.set_state(state);
                return Ok(false);
            }
            Event::UITick() => {
                self.loading.tick();
                return Ok(false);
            }
            Event::UIResize() => {
                return Ok(false);
            }
            _ if self.pending => {
                return Ok(false);
            }
            event => {
                match self.screen() {
                    Screen::Welcome => self.handle_welcome(event, tx)?,
                    Screen::Loading => (),
                    Screen::Game => self.handle_game(event, tx)?,
                    Screen::Result => {
                        if let Event::KeyboardEnter() = event {
                            self.send(Action::Reset(), tx)?;
                        }
                    }
                    Screen::Error => {
                        if let Event::KeyboardEnter() | Event::KeyboardEsc() = event {
                            self.send(Action::Reset(), tx)?;
                        }
                    }
                }

                return Ok(false);
            }
        }
    }

    fn set_state(&mut self, state: SessionState) {
        self.pending = false;

        let question_changed = match (&self.state, &state) {
            (SessionState::InProgress(prev), SessionState::InProgress(next)) => {
                prev.current_index() != next.current_index()
            }
            _ => true,
        };
        if question_changed {
            self.answer_cursor = 0;
        }

        if state == SessionState::Idle {
            self.custom_topic = TopicInput::default();
        }

        self.state = state;
    }

    fn handle_welcome(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match event {
            Event::KeyboardUp() => {
                self.welcome_cursor = self.welcome_cursor.saturating_sub(1);
            }
            Event::KeyboardDown() => {
                self.welcome_cursor = usize::min(self.welcome_cursor + 1, self.topics.len());
            }
            Event::KeyboardEnter() => {
                if self.custom_topic_selected() {
                    let topic = self.custom_topic.topic();
                    self.start_topic(&topic, tx)?;
                } else {
                    let topic = self.topics[self.welcome_cursor].to_string();
                    self.start_topic(&topic, tx)?;
                }
            }
            Event::KeyboardPaste(text) => {
                self.welcome_cursor = self.topics.len();
                self.custom_topic.paste(&text);
            }
            Event::KeyboardCharInput(input) => {
                self.welcome_cursor = self.topics.len();
                self.custom_topic.input(input);
            }
            _ => (),
        }

        let focused = self.custom_topic_selected();
        self.custom_topic.set_focused(focused);

        return Ok(());
    }

    fn handle_game(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let answered = match &self.state {
            SessionState::InProgress(progress) => progress.is_answered(),
            _ => return Ok(()),
        };

        match event {
            Event::KeyboardEsc() => {
                self.send(Action::Reset(), tx)?;
            }
            Event::KeyboardEnter() => {
                if answered {
                    self.send(Action::Advance(), tx)?;
                } else {
                    self.send(Action::SubmitAnswer(self.answer_cursor), tx)?;
                }
            }
            Event::KeyboardUp() if !answered => {
                self.answer_cursor = self.answer_cursor.saturating_sub(1);
            }
            Event::KeyboardDown() if !answered => {
                self.answer_cursor = usize::min(self.answer_cursor + 1, ANSWERS_PER_QUESTION - 1);
            }
            Event::KeyboardCharInput(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
                ..
            }) if !answered => {
                if let Some(digit) = char.to_digit(10) {
                    let digit = digit as usize;
                    if (1..=ANSWERS_PER_QUESTION).contains(&digit) {
                        self.answer_cursor = digit - 1;
                        self.send(Action::SubmitAnswer(digit - 1), tx)?;
                    }
                }
            }
            _ => (),
        }

        return Ok(());
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>) {
        let rect = frame.size();
        match &self.state {
            SessionState::Idle => {
                views::render_welcome(
                    frame,
                    rect,
                    &self.topics,
                    self.welcome_cursor,
                    &self.custom_topic,
                );
            }
            SessionState::Loading => {
                self.loading.render(frame, rect, &self.last_topic);
            }
            SessionState::InProgress(progress) => {
                views::render_game(frame, rect, progress, self.answer_cursor);
            }
            SessionState::GameOver(result) => {
                views::render_result(frame, rect, result);
            }
            SessionState::Failed(message) => {
                views::render_error(frame, rect, message);
            }
        }
    }
}
