//! Position lifecycle management

pub mod ledger;

pub use ledger::*;
