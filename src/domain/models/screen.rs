use super::SessionState;

/// Which view to draw. Always derived from the session state, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Loading,
    Game,
    Result,
    Error,
}

impl Screen {
    pub fn from_state(state: &SessionState) -> Screen {
        match state {
            SessionState::Idle => return Screen::Welcome,
            SessionState::Loading => return Screen::Loading,
            SessionState::InProgress(_) => return Screen::Game,
            SessionState::GameOver(_) => return Screen::Result,
            SessionState::Failed(_) => return Screen::Error,
        }
    }
}
