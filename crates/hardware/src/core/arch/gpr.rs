//! Committed (architectural) register file.
//!
//! This module implements the register state that only in-order commit may
//! change. It performs the following:
//! 1. **Storage:** Maintains a configurable number of integer registers.
//! 2. **Invariant Enforcement:** Ensures that register `r0` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use crate::common::constants::{DEFAULT_ARCH_REGS, ZERO_REG};

/// General-purpose register file holding committed architectural state.
///
/// Register `r0` is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: Vec<u64>,
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new(DEFAULT_ARCH_REGS)
    }
}

impl Gpr {
    /// Creates a register file of `count` registers, all zero.
    pub fn new(count: usize) -> Self {
        Self {
            regs: vec![0; count],
        }
    }

    /// Number of architectural registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Whether the file has no registers at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Reads a register. `r0` always reads as 0.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        if idx == ZERO_REG { 0 } else { self.regs[idx] }
    }

    /// Writes a register. Writes to `r0` are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != ZERO_REG {
            self.regs[idx] = val;
        }
    }

    /// All register values, `r0` first.
    pub fn values(&self) -> &[u64] {
        &self.regs
    }

    /// Dumps all registers to stdout, two per line.
    pub fn dump(&self) {
        for (row, values) in self.regs.chunks(2).enumerate() {
            let line: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(col, v)| format!("r{:<3}={:#018x}", row * 2 + col, v))
                .collect();
            println!("{}", line.join(" "));
        }
    }
}
