mod action;
mod error;
mod event;
mod generator;
mod loading;
mod question;
mod screen;
mod session_state;
mod topic_input;

pub use action::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use loading::*;
pub use question::*;
pub use screen::*;
pub use session_state::*;
pub use topic_input::*;
