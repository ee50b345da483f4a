//! Shared settings, errors and constants for the classbell reminder job.

pub mod config;
pub mod constants;
pub mod error;
