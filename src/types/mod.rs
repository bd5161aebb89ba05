//! Core data types and structures

pub mod pools;
pub mod metrics;
pub mod signals;
pub mod positions;
pub mod state;
pub mod report;

pub use pools::*;
pub use metrics::*;
pub use signals::*;
pub use positions::*;
pub use state::*;
pub use report::*;
