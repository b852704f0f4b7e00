#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::QuizSession;
use crate::domain::models::Action;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Up arrow / Down arrow - Move between topics or answers
- Enter - Start the highlighted topic, submit the highlighted answer, or continue
- 1 to 4 - Submit an answer directly
- ESC - Abandon the current quiz, or go back from an error
- CTRL+C - Exit Quizmaster
        "#;

    return text.trim().to_string();
}

pub struct ActionsService {}

impl ActionsService {
    /// Applies actions from the UI to the session, in the order they were
    /// sent. Returns once every sender is gone.
    pub async fn start(session: QuizSession, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        while let Some(action) = rx.recv().await {
            tracing::debug!(action = ?action, "Received action");

            match action {
                Action::LoadTopic(topic) => {
                    // The request keeps running on its own, completion is
                    // observed through the session subscription.
                    session.load(&topic);
                }
                Action::SubmitAnswer(answer_index) => {
                    session.submit_answer(answer_index);
                }
                Action::Advance() => {
                    session.advance();
                }
                Action::Reset() => {
                    session.reset();
                }
            }
        }

        return Ok(());
    }
}
