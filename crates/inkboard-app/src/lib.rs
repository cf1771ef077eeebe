//! Inkboard Replay
//!
//! Drives the interaction core from a scripted gesture list against an
//! in-memory board, for testing and headless export.

mod replay;
mod script;

pub use replay::{Replay, ReplayError, load_script};
pub use script::{Script, Step};
