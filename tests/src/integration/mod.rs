//! Cross-crate integration flows.

pub mod resolution;
pub mod transport;
