//! Instruction pipeline implementation.
//!
//! This module contains the out-of-order pipeline around the scheduling core.
//! It includes the following components:
//! 1. **Backend:** The scheduler (window, RAT, wakeup matrix, select).
//! 2. **Engine:** The per-cycle driver tying scheduler, units and frontend together.
//! 3. **Frontend:** In-order supply of decoded instructions with backpressure hold.

/// Backend scheduling core.
pub mod backend;

/// Pipeline driver and commit log.
pub mod engine;

/// Decoded instruction supply.
pub mod frontend;

pub use engine::{CommitRecord, Pipeline};
