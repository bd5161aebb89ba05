//! Signal classification
//!
//! Both classifiers are ordered rule tables evaluated top to bottom; the
//! first matching rule wins, so precedence is explicit and testable per rule.

pub mod standard;
pub mod meme;

pub use standard::classify_standard;
pub use meme::classify_meme;
