//! Simulation statistics collection and reporting.
//!
//! This module tracks throughput metrics for the scheduling core. It provides:
//! 1. **Cycle and IPC:** Total cycles, committed instructions, and derived IPC/CPI.
//! 2. **Lifecycle counts:** Dispatched, issued, completed, committed and flushed.
//! 3. **Stalls:** Cycles in which dispatch was refused because the window was full.
//! 4. **Issue mix:** Issued operations per operation class.

use std::fmt;

use serde::Serialize;

use crate::isa::instruction::OpClass;

/// Simulation statistics for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions accepted into the window.
    pub dispatched: u64,
    /// Cycles in which a dispatch attempt was refused (window full).
    pub dispatch_stalls: u64,
    /// Instructions handed to an execution resource.
    pub issued: u64,
    /// Results delivered back to the scheduler.
    pub completed: u64,
    /// Instructions retired into architectural state.
    pub committed: u64,
    /// Slots squashed by recovery.
    pub flushed: u64,

    /// Simple integer operations issued.
    pub issued_int_alu: u64,
    /// Multiplications issued.
    pub issued_int_mul: u64,
    /// Divisions and remainders issued.
    pub issued_int_div: u64,
}

impl SimStats {
    /// Counts one issue of an operation of `class`.
    pub fn record_issue(&mut self, class: OpClass) {
        self.issued += 1;
        match class {
            OpClass::IntAlu => self.issued_int_alu += 1,
            OpClass::IntMul => self.issued_int_mul += 1,
            OpClass::IntDiv => self.issued_int_div += 1,
        }
    }

    /// Committed instructions per cycle (0 before the first cycle).
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.committed as f64 / self.cycles as f64
        }
    }

    /// Cycles per committed instruction (0 before the first commit).
    pub fn cpi(&self) -> f64 {
        if self.committed == 0 {
            0.0
        } else {
            self.cycles as f64 / self.committed as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cyc = self.cycles.max(1) as f64;
        let issued = self.issued.max(1) as f64;

        writeln!(f, "==========================================================")?;
        writeln!(f, "SCHEDULING CORE STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.committed)?;
        writeln!(f, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "LIFECYCLE")?;
        writeln!(f, "  dispatched             {}", self.dispatched)?;
        writeln!(f, "  issued                 {}", self.issued)?;
        writeln!(f, "  completed              {}", self.completed)?;
        writeln!(f, "  committed              {}", self.committed)?;
        writeln!(f, "  flushed                {}", self.flushed)?;
        writeln!(
            f,
            "  stalls.dispatch        {} ({:.2}%)",
            self.dispatch_stalls,
            self.dispatch_stalls as f64 / cyc * 100.0
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "ISSUE MIX")?;
        for (name, count) in [
            ("op.int_alu", self.issued_int_alu),
            ("op.int_mul", self.issued_int_mul),
            ("op.int_div", self.issued_int_div),
        ] {
            writeln!(
                f,
                "  {:<22} {} ({:.2}%)",
                name,
                count,
                count as f64 / issued * 100.0
            )?;
        }
        write!(f, "==========================================================")
    }
}
