use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::empty_quiz_response_fixture;
use test_utils::quiz_response_fixture;

use super::QuizSession;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;
use crate::domain::models::GeneratorPrompt;
use crate::domain::models::SessionState;
use crate::domain::services::GeneratorClient;

const SINGLE_QUESTION: &str = r#"{ "questions": [
    { "question": "Which planet is known as the Red Planet?", "answers": ["Venus", "Mars", "Jupiter", "Mercury"], "correctIndex": 1 }
] }"#;

/// Answers based on the topic of the prompt.
struct TopicGenerator {}

#[async_trait]
impl Generator for TopicGenerator {
    fn name(&self) -> GeneratorName {
        return GeneratorName::Ollama;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        return Ok(vec![]);
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: &GeneratorPrompt) -> Result<String> {
        match prompt.topic.as_str() {
            "astronomy" => return Ok(empty_quiz_response_fixture().to_string()),
            "planets" => return Ok(quiz_response_fixture().to_string()),
            "slow planets" => {
                tokio::time::sleep(Duration::from_millis(150)).await;
                return Ok(SINGLE_QUESTION.to_string());
            }
            "silence" => bail!("   "),
            _ => bail!("Ollama is not running"),
        }
    }
}

fn session() -> QuizSession {
    return QuizSession::new(GeneratorClient::new(Box::new(TopicGenerator {}), 2));
}

async fn loaded_session() -> QuizSession {
    let session = session();
    session.load("planets").await.unwrap();
    return session;
}

fn failed_message(state: SessionState) -> String {
    match state {
        SessionState::Failed(message) => return message,
        other => panic!("Expected failed state, got {}", other.name()),
    }
}

#[test]
fn it_starts_idle() {
    assert_eq!(session().state(), SessionState::Idle);
}

#[tokio::test]
async fn it_loads_questions() {
    let session = session();
    let mut rx = session.subscribe();

    let handle = session.load("planets");
    assert_eq!(session.state(), SessionState::Loading);
    handle.await.unwrap();

    match session.state() {
        SessionState::InProgress(progress) => {
            assert_eq!(progress.current_index(), 0);
            assert_eq!(progress.score(), 0);
            assert_eq!(progress.selected_answer(), None);
            assert_eq!(progress.total(), 2);
            assert_eq!(
                progress.current_question().text(),
                "Which planet is known as the Red Planet?"
            );
        }
        other => panic!("Expected in-progress state, got {}", other.name()),
    }

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().name(), "in-progress");
}

#[tokio::test]
async fn it_fails_on_an_empty_question_list() {
    let session = session();
    session.load("astronomy").await.unwrap();

    assert_eq!(
        failed_message(session.state()),
        "the generator returned no questions"
    );
}

#[tokio::test]
async fn it_fails_with_the_generator_error() {
    let session = session();
    session.load("cooking").await.unwrap();

    assert_eq!(failed_message(session.state()), "Ollama is not running");
}

#[tokio::test]
async fn it_uses_a_fallback_message_for_blank_errors() {
    let session = session();
    session.load("silence").await.unwrap();

    assert_eq!(failed_message(session.state()), "Unknown error");
}

#[tokio::test]
async fn it_fails_on_a_blank_topic() {
    let session = session();
    session.load("   ").await.unwrap();

    assert_eq!(
        failed_message(session.state()),
        "a topic is required to generate questions"
    );
}

#[tokio::test]
async fn it_plays_through_a_loaded_quiz() {
    let session = loaded_session().await;

    session.submit_answer(0);
    session.submit_answer(1);
    session.advance();
    session.submit_answer(2);
    session.advance();

    match session.state() {
        SessionState::GameOver(result) => {
            assert_eq!(result.score(), 1);
            assert_eq!(result.total(), 2);
        }
        other => panic!("Expected game over, got {}", other.name()),
    }
}

#[tokio::test]
async fn it_ignores_advance_while_idle() {
    let session = session();
    let mut rx = session.subscribe();

    session.advance();

    assert_eq!(session.state(), SessionState::Idle);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionState::Idle);
}

#[tokio::test]
async fn it_does_not_notify_on_ignored_answers() {
    let session = loaded_session().await;
    session.submit_answer(1);

    let mut rx = session.subscribe();
    session.submit_answer(0);

    assert!(!rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    match state {
        SessionState::InProgress(progress) => {
            assert_eq!(progress.score(), 1);
            assert_eq!(progress.selected_answer(), Some(1));
        }
        other => panic!("Expected in-progress state, got {}", other.name()),
    }
}

#[tokio::test]
async fn it_resets_from_every_state() {
    let session = session();
    session.reset();
    assert_eq!(session.state(), SessionState::Idle);

    let handle = session.load("planets");
    session.reset();
    assert_eq!(session.state(), SessionState::Idle);
    handle.await.unwrap();

    session.reset();
    assert_eq!(session.state(), SessionState::Idle);

    let session = loaded_session().await;
    session.advance();
    session.advance();
    assert_eq!(session.state().name(), "game-over");
    session.reset();
    assert_eq!(session.state(), SessionState::Idle);

    session.load("cooking").await.unwrap();
    assert_eq!(session.state().name(), "failed");
    session.reset();
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn it_shares_state_between_clones() {
    let session = session();
    let worker = session.clone();

    worker.load("planets").await.unwrap();
    worker.submit_answer(1);

    match session.state() {
        SessionState::InProgress(progress) => assert_eq!(progress.score(), 1),
        other => panic!("Expected in-progress state, got {}", other.name()),
    }
}

#[tokio::test]
async fn it_lets_the_last_completed_load_win() {
    let session = session();

    let slow = session.load("slow planets");
    let fast = session.load("planets");

    fast.await.unwrap();
    match session.state() {
        SessionState::InProgress(progress) => assert_eq!(progress.total(), 2),
        other => panic!("Expected in-progress state, got {}", other.name()),
    }

    slow.await.unwrap();
    match session.state() {
        SessionState::InProgress(progress) => assert_eq!(progress.total(), 1),
        other => panic!("Expected in-progress state, got {}", other.name()),
    }
}

#[tokio::test]
async fn it_loads_without_waiting_for_the_health_check() {
    let session = session();

    let health = session.spawn_health_check();
    let load = session.load("planets");

    tokio::time::timeout(Duration::from_millis(100), load)
        .await
        .expect("load should not wait for the health check")
        .unwrap();
    assert!(matches!(session.state(), SessionState::InProgress(_)));
    assert!(!health.is_finished());

    health.await.unwrap();
}
