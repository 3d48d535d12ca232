//! Core processor implementation.
//!
//! This module contains the committed architectural state, the out-of-order
//! pipeline built around the scheduling core, and the execution units.

/// Architectural state (integer register file).
pub mod arch;

/// Instruction pipeline implementation (scheduler, driver, frontend).
pub mod pipeline;

/// Execution units (ALU, functional units).
pub mod units;
