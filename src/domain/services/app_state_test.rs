use std::sync::Arc;

use anyhow::Result;
use test_utils::quiz_response_fixture;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::QuestionSet;
use crate::domain::models::QuizProgress;
use crate::domain::models::Screen;
use crate::domain::models::SessionState;
use crate::domain::services::parse_questions;

fn app_state(state: SessionState) -> AppState<'static> {
    return AppState::new(
        vec!["Photography".to_string(), "Yoga and meditation".to_string()],
        state,
    );
}

fn started() -> SessionState {
    let questions = QuestionSet::new(parse_questions(quiz_response_fixture()).unwrap()).unwrap();
    return SessionState::InProgress(QuizProgress::start(Arc::new(questions)));
}

fn char_input(char: char) -> Event {
    return Event::KeyboardCharInput(Input {
        key: Key::Char(char),
        ctrl: false,
        alt: false,
    });
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = vec![];
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    return actions;
}

#[test]
fn it_quits_on_ctrl_c_from_any_screen() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    for state in [
        SessionState::Idle,
        SessionState::Loading,
        started(),
        SessionState::Failed("oops".to_string()),
    ] {
        let mut app_state = app_state(state);
        assert!(app_state.handle_event(Event::KeyboardCTRLC(), &tx)?);
    }

    return Ok(());
}

#[test]
fn it_derives_the_screen_from_state() {
    assert_eq!(app_state(SessionState::Idle).screen(), Screen::Welcome);
    assert_eq!(app_state(SessionState::Loading).screen(), Screen::Loading);
    assert_eq!(app_state(started()).screen(), Screen::Game);
    assert_eq!(
        app_state(SessionState::Failed("oops".to_string())).screen(),
        Screen::Error
    );
}

mod welcome {
    use super::*;

    #[test]
    fn it_loads_the_highlighted_preset() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(SessionState::Idle);

        app_state.handle_event(Event::KeyboardDown(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(
            drain(&mut rx),
            vec![Action::LoadTopic("Yoga and meditation".to_string())]
        );
        assert_eq!(app_state.last_topic, "Yoga and meditation");

        return Ok(());
    }

    #[test]
    fn it_loads_a_topic_once() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(SessionState::Idle);

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(
            drain(&mut rx),
            vec![Action::LoadTopic("Photography".to_string())]
        );

        return Ok(());
    }

    #[test]
    fn it_keeps_the_cursor_in_bounds() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(SessionState::Idle);

        app_state.handle_event(Event::KeyboardUp(), &tx)?;
        assert_eq!(app_state.welcome_cursor, 0);

        for _ in 0..5 {
            app_state.handle_event(Event::KeyboardDown(), &tx)?;
        }
        assert_eq!(app_state.welcome_cursor, 2);

        return Ok(());
    }

    #[test]
    fn it_loads_a_typed_topic() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(SessionState::Idle);

        for char in "Jazz 1959".chars() {
            app_state.handle_event(char_input(char), &tx)?;
        }
        assert_eq!(app_state.welcome_cursor, 2);

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(
            drain(&mut rx),
            vec![Action::LoadTopic("Jazz 1959".to_string())]
        );

        return Ok(());
    }

    #[test]
    fn it_loads_a_pasted_topic() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(SessionState::Idle);

        app_state.handle_event(Event::KeyboardPaste("Roman history\n".to_string()), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(
            drain(&mut rx),
            vec![Action::LoadTopic("Roman history".to_string())]
        );

        return Ok(());
    }

    #[test]
    fn it_ignores_a_blank_custom_topic() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(SessionState::Idle);

        app_state.handle_event(char_input(' '), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert!(drain(&mut rx).is_empty());
        assert_eq!(app_state.last_topic, "");

        return Ok(());
    }
}

mod game {
    use super::*;

    #[test]
    fn it_submits_digit_answers() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(started());

        app_state.handle_event(char_input('5'), &tx)?;
        app_state.handle_event(char_input('x'), &tx)?;
        app_state.handle_event(char_input('2'), &tx)?;

        assert_eq!(drain(&mut rx), vec![Action::SubmitAnswer(1)]);

        return Ok(());
    }

    #[test]
    fn it_submits_the_highlighted_answer() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(started());

        for _ in 0..5 {
            app_state.handle_event(Event::KeyboardDown(), &tx)?;
        }
        app_state.handle_event(Event::KeyboardUp(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(drain(&mut rx), vec![Action::SubmitAnswer(2)]);

        return Ok(());
    }

    #[test]
    fn it_advances_once_answered() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(started());
        app_state.handle_event(Event::SessionChanged(started().submit_answer(1).unwrap()), &tx)?;

        app_state.handle_event(char_input('3'), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(drain(&mut rx), vec![Action::Advance()]);

        return Ok(());
    }

    #[test]
    fn it_resets_the_cursor_on_the_next_question() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(started());

        app_state.handle_event(Event::KeyboardDown(), &tx)?;
        app_state.handle_event(Event::SessionChanged(started().submit_answer(1).unwrap()), &tx)?;
        assert_eq!(app_state.answer_cursor, 1);

        app_state.handle_event(
            Event::SessionChanged(started().submit_answer(1).unwrap().advance().unwrap()),
            &tx,
        )?;
        assert_eq!(app_state.answer_cursor, 0);

        return Ok(());
    }

    #[test]
    fn it_waits_for_the_next_question_before_accepting_keys() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let answered = started().submit_answer(1).unwrap();
        let mut app_state = app_state(started());
        app_state.handle_event(Event::SessionChanged(answered.clone()), &tx)?;

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        let actions = drain(&mut rx);
        assert_eq!(actions, vec![Action::Advance()]);

        let mut session = answered;
        for action in actions {
            if let Action::Advance() = action {
                session = session.advance().unwrap();
            }
        }
        match &session {
            SessionState::InProgress(progress) => assert_eq!(progress.question_number(), 2),
            other => panic!("Expected in-progress state, got {}", other.name()),
        }

        app_state.handle_event(Event::SessionChanged(session), &tx)?;
        assert!(!app_state.pending);

        app_state.handle_event(char_input('3'), &tx)?;
        assert_eq!(drain(&mut rx), vec![Action::SubmitAnswer(2)]);

        return Ok(());
    }

    #[test]
    fn it_does_not_skip_the_result_screen_on_repeated_enter() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let last = started().advance().unwrap().submit_answer(2).unwrap();
        let mut app_state = app_state(last.clone());

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        assert_eq!(drain(&mut rx), vec![Action::Advance()]);

        app_state.handle_event(Event::SessionChanged(last.advance().unwrap()), &tx)?;
        assert_eq!(app_state.screen(), Screen::Result);

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        assert_eq!(drain(&mut rx), vec![Action::Reset()]);

        return Ok(());
    }

    #[test]
    fn it_abandons_the_quiz_on_esc() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state(started());

        app_state.handle_event(Event::KeyboardEsc(), &tx)?;

        assert_eq!(drain(&mut rx), vec![Action::Reset()]);

        return Ok(());
    }
}

#[test]
fn it_resets_from_the_result_screen() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state(started().advance().unwrap().advance().unwrap());
    assert_eq!(app_state.screen(), Screen::Result);

    app_state.handle_event(Event::KeyboardEsc(), &tx)?;
    app_state.handle_event(Event::KeyboardEnter(), &tx)?;

    assert_eq!(drain(&mut rx), vec![Action::Reset()]);

    return Ok(());
}

#[test]
fn it_resets_from_the_error_screen() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state(SessionState::Failed("oops".to_string()));

    app_state.handle_event(Event::KeyboardEsc(), &tx)?;
    assert_eq!(drain(&mut rx), vec![Action::Reset()]);
    assert!(app_state.pending);

    app_state.handle_event(Event::KeyboardEnter(), &tx)?;
    assert!(drain(&mut rx).is_empty());

    return Ok(());
}

#[test]
fn it_ignores_keys_while_loading() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state(SessionState::Loading);

    app_state.handle_event(Event::KeyboardEnter(), &tx)?;
    app_state.handle_event(char_input('1'), &tx)?;
    app_state.handle_event(Event::UITick(), &tx)?;

    assert!(drain(&mut rx).is_empty());

    return Ok(());
}

#[test]
fn it_clears_the_custom_topic_when_returning_to_welcome() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state(SessionState::Idle);

    app_state.handle_event(char_input('a'), &tx)?;
    app_state.handle_event(Event::SessionChanged(SessionState::Loading), &tx)?;
    app_state.handle_event(Event::SessionChanged(SessionState::Idle), &tx)?;

    assert!(app_state.custom_topic.is_empty());

    return Ok(());
}
