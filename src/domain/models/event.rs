use tui_textarea::Input;

use super::SessionState;

pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardDown(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    KeyboardUp(),
    SessionChanged(SessionState),
    UIResize(),
    UITick(),
}
