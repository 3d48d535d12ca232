//! Common types and constants shared across the simulator.
//!
//! This module provides:
//! 1. **Constants:** Architectural and machine-shape defaults.
//! 2. **Error Handling:** Scheduler, configuration, parse and simulation errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{ConfigError, ParseError, ParseErrorKind, SchedulerError, SimError};
