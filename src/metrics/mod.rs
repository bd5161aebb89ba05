//! Metrics derivation engine
//!
//! Pure transformations from pool snapshots to derived quality/risk scores.
//! Identical input always yields identical output; nothing here touches the
//! network or mutates state.

pub mod engine;
pub mod dark;

pub use engine::*;
pub use dark::*;
