//! External collaborator seams
//!
//! Everything the core pipeline cannot compute for itself lives behind a
//! trait here: contract safety, social sentiment, buy/sell confirmation,
//! trade execution, position valuation and notification delivery. The
//! simulated implementations are the only place randomness is allowed.

pub mod safety;
pub mod scoring;
pub mod execution;
pub mod valuation;
pub mod notify;

pub use safety::*;
pub use scoring::*;
pub use execution::*;
pub use valuation::*;
pub use notify::*;
