//! Error types and result aliases

pub mod bot_error;

pub use bot_error::*;
