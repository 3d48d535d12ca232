//! Shared test infrastructure.

pub mod strategy;

pub use builder::*;
pub use harness::TestContext;
