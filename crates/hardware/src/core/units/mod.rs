//! Execution resources.
//!
//! Reference implementations of the units that sit around the scheduler:
//! the integer ALU that computes results and the latency-modelling
//! functional unit wrapper the pipeline driver issues into.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Functional units with latency and pipelining.
pub mod fu;

pub use fu::FunctionalUnit;
