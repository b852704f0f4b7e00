#[cfg(test)]
#[path = "quiz_session_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::GeneratorClient;
use crate::domain::models::QuestionSet;
use crate::domain::models::QuizProgress;
use crate::domain::models::SessionState;

fn failed(message: String) -> SessionState {
    if message.trim().is_empty() {
        return SessionState::Failed("Unknown error".to_string());
    }

    return SessionState::Failed(message);
}

/// Owns the state of one quiz attempt. Clones share the same state, so the
/// handle can be given to the actions worker while the UI subscribes.
#[derive(Clone)]
pub struct QuizSession {
    state: Arc<watch::Sender<SessionState>>,
    generator: Arc<GeneratorClient>,
}

impl QuizSession {
    pub fn new(generator: GeneratorClient) -> QuizSession {
        let (state, _) = watch::channel(SessionState::Idle);

        return QuizSession {
            state: Arc::new(state),
            generator: Arc::new(generator),
        };
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        return self.state.subscribe();
    }

    pub fn state(&self) -> SessionState {
        return self.state.borrow().clone();
    }

    pub async fn health_check(&self) -> Result<()> {
        return self.generator.health_check().await;
    }

    /// Runs the generator health check on its own task. A failure is only
    /// logged, loads do not wait for it.
    pub fn spawn_health_check(&self) -> JoinHandle<()> {
        let session = self.clone();
        return tokio::spawn(async move {
            if let Err(err) = session.health_check().await {
                tracing::warn!(error = %err, "Generator health check failed");
            }
        });
    }

    /// Switches to `Loading` and requests questions in the background. A load
    /// that is already running is not cancelled, whichever finishes last
    /// decides the state. Dropping the handle does not abort the request.
    pub fn load(&self, topic: &str) -> JoinHandle<()> {
        let topic = topic.to_string();
        tracing::info!(topic = %topic, "Loading quiz");
        self.state.send_replace(SessionState::Loading);

        let state = self.state.clone();
        let generator = self.generator.clone();
        return tokio::spawn(async move {
            let next = match generator.generate_questions(&topic).await {
                Ok(questions) => match QuestionSet::new(questions) {
                    Ok(questions) => {
                        SessionState::InProgress(QuizProgress::start(Arc::new(questions)))
                    }
                    Err(err) => failed(err.to_string()),
                },
                Err(err) => failed(err.to_string()),
            };

            match &next {
                SessionState::Failed(message) => {
                    tracing::error!(topic = %topic, error = %message, "Failed to load quiz");
                }
                other => {
                    tracing::info!(topic = %topic, state = other.name(), "Quiz loaded");
                }
            }

            state.send_replace(next);
        });
    }

    pub fn submit_answer(&self, answer_index: usize) {
        self.apply("submit-answer", |state| {
            return state.submit_answer(answer_index);
        });
    }

    pub fn advance(&self) {
        self.apply("advance", SessionState::advance);
    }

    pub fn reset(&self) {
        tracing::debug!("Resetting quiz");
        self.state.send_replace(SessionState::Idle);
    }

    fn apply<F>(&self, command: &str, transition: F)
    where
        F: FnOnce(&SessionState) -> Option<SessionState>,
    {
        let modified = self.state.send_if_modified(|state| {
            match transition(&*state) {
                Some(next) => {
                    *state = next;
                    return true;
                }
                None => return false,
            }
        });

        if modified {
            tracing::debug!(command = command, state = self.state.borrow().name(), "Quiz updated");
        } else {
            tracing::debug!(command = command, "Ignored command");
        }
    }
}
