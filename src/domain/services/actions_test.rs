use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::quiz_response_fixture;
use tokio::sync::mpsc;

use super::help_text;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;
use crate::domain::models::GeneratorPrompt;
use crate::domain::models::SessionState;
use crate::domain::services::GeneratorClient;
use crate::domain::services::QuizSession;

struct FixtureGenerator {}

#[async_trait]
impl Generator for FixtureGenerator {
    fn name(&self) -> GeneratorName {
        return GeneratorName::Ollama;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        return Ok(vec![]);
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: &GeneratorPrompt) -> Result<String> {
        if prompt.topic == "broken" {
            bail!("Failed to make completion request to Ollama, 500");
        }
        return Ok(quiz_response_fixture().to_string());
    }
}

fn session() -> QuizSession {
    return QuizSession::new(GeneratorClient::new(Box::new(FixtureGenerator {}), 2));
}

async fn run(session: &QuizSession, actions: Vec<Action>) -> Result<SessionState> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    for action in actions {
        tx.send(action)?;
    }
    drop(tx);

    ActionsService::start(session.clone(), &mut rx).await?;

    let mut state_rx = session.subscribe();
    let state = state_rx
        .wait_for(|state| return *state != SessionState::Loading)
        .await?
        .clone();

    return Ok(state);
}

#[test]
fn it_lists_hotkeys() {
    insta::assert_snapshot!(help_text(), @r###"
    HOTKEYS:
    - Up arrow / Down arrow - Move between topics or answers
    - Enter - Start the highlighted topic, submit the highlighted answer, or continue
    - 1 to 4 - Submit an answer directly
    - ESC - Abandon the current quiz, or go back from an error
    - CTRL+C - Exit Quizmaster
    "###);
}

#[tokio::test]
async fn it_loads_a_topic() -> Result<()> {
    let session = session();
    let state = run(&session, vec![Action::LoadTopic("planets".to_string())]).await?;

    match state {
        SessionState::InProgress(progress) => assert_eq!(progress.total(), 2),
        other => bail!("Expected in-progress state, got {}", other.name()),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_failed_loads() -> Result<()> {
    let session = session();
    let state = run(&session, vec![Action::LoadTopic("broken".to_string())]).await?;

    assert_eq!(
        state,
        SessionState::Failed("Failed to make completion request to Ollama, 500".to_string())
    );

    return Ok(());
}

#[tokio::test]
async fn it_applies_answers_in_order() -> Result<()> {
    let session = session();
    run(&session, vec![Action::LoadTopic("planets".to_string())]).await?;

    let state = run(
        &session,
        vec![
            Action::SubmitAnswer(1),
            Action::SubmitAnswer(3),
            Action::Advance(),
            Action::SubmitAnswer(2),
            Action::Advance(),
        ],
    )
    .await?;

    match state {
        SessionState::GameOver(result) => {
            assert_eq!(result.score(), 2);
            assert_eq!(result.total(), 2);
        }
        other => bail!("Expected game over, got {}", other.name()),
    }

    return Ok(());
}

#[tokio::test]
async fn it_ignores_answers_while_loading() -> Result<()> {
    let session = session();
    let state = run(
        &session,
        vec![
            Action::LoadTopic("planets".to_string()),
            Action::SubmitAnswer(1),
            Action::Advance(),
        ],
    )
    .await?;

    match state {
        SessionState::InProgress(progress) => {
            assert_eq!(progress.current_index(), 0);
            assert_eq!(progress.selected_answer(), None);
        }
        other => bail!("Expected in-progress state, got {}", other.name()),
    }

    return Ok(());
}

#[tokio::test]
async fn it_resets() -> Result<()> {
    let session = session();
    run(&session, vec![Action::LoadTopic("planets".to_string())]).await?;

    let state = run(&session, vec![Action::Reset()]).await?;
    assert_eq!(state, SessionState::Idle);

    return Ok(());
}
