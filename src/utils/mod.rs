//! Shared utilities

pub mod logging;

pub use logging::*;
