//! Architectural state.
//!
//! Only the committed integer register file survives here; it is the sole
//! architectural state the scheduling core updates, and only at commit.

/// Committed general-purpose register file.
pub mod gpr;

pub use gpr::Gpr;
