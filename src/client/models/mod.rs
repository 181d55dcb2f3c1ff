pub mod app_state;
pub mod load_state;
pub mod messages;
pub mod two_phase;
