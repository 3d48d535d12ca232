//! Out-of-order instruction scheduling core.
//!
//! This crate implements the dynamic scheduling heart of a superscalar core
//! for functional and performance models:
//! 1. **Scheduler:** Instruction window with head/tail retirement pointers,
//!    register alias table, and a slot×slot wakeup matrix.
//! 2. **Lifecycle:** Dispatch, oldest-ready Issue, Complete with wakeup
//!    broadcast, in-order Commit, and `flush` recovery.
//! 3. **ISA:** A small integer instruction set with an assembly text format.
//! 4. **Pipeline:** Frontend, latency-modelling functional units, and a
//!    per-cycle driver.
//! 5. **Simulation:** Configuration, program loading, and statistics.
//!
//! ```
//! use o3sim_core::{Config, Simulator, parse_program};
//!
//! let program = parse_program("li r1, 6\nli r2, 7\nmul r3, r1, r2\n").unwrap();
//! let mut sim = Simulator::new(&Config::default(), program).unwrap();
//! let stats = sim.run().unwrap();
//! assert_eq!(stats.committed, 3);
//! assert_eq!(sim.registers().read(3), 42);
//! ```

/// Common types and constants (errors, limits).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// Core (architectural state, pipeline, scheduler, execution units).
pub mod core;
/// Instruction set (opcodes, operation classes, assembly syntax).
pub mod isa;
/// Simulator and program loader.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The scheduling core and its handles.
pub use crate::core::pipeline::backend::o3::{IssuedOp, Retired, Scheduler, SlotTag};
/// Instruction types and the listing parser.
pub use crate::isa::{CapabilityMask, DecodedInstruction, OpClass, Opcode, parse_program};
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Run statistics.
pub use crate::stats::SimStats;
