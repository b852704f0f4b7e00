pub mod actions;
mod app_state;
pub mod events;
mod generator_client;
mod quiz_session;
mod views;

pub use app_state::*;
pub use generator_client::*;
pub use quiz_session::*;
