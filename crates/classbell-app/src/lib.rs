//! Process wiring for the `classbell` binary.

pub mod bootstrap;
pub mod error;
pub mod watch;
