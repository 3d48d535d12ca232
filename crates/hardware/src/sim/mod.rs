//! Simulation driver and program loading.

/// Program and configuration file loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use loader::{load_config, load_program};
pub use simulator::Simulator;
