pub mod engine;
pub mod morse;
pub mod player;
pub mod schedule;
