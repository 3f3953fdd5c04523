//! CLI library components for the exit list tooling.

pub mod config;
pub mod fetch;
pub mod logging;
