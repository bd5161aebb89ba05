//! Risk gating for signal admission

pub mod gate;

pub use gate::*;
