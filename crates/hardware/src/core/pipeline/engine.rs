//! Pipeline driver.
//!
//! The [`Pipeline`] owns the scheduler, the execution resources and the
//! frontend, and advances them one cycle at a time. Each cycle runs:
//! 1. **Commit:** Retire up to `commit_width` completed head slots. This sees
//!    end-of-previous-cycle state, so nothing completes and commits in one cycle.
//! 2. **Complete:** Deliver every result whose latency has elapsed.
//! 3. **Issue:** Offer each free unit, in configuration order, the oldest ready
//!    instruction it accepts. Wakeups from step 2 are visible here.
//! 4. **Dispatch:** Feed up to `dispatch_width` instructions from the frontend,
//!    holding the first refused one for the next cycle.

use tracing::debug;

use crate::common::error::SchedulerError;
use crate::config::Config;
use crate::core::arch::Gpr;
use crate::core::pipeline::backend::o3::{Retired, Scheduler, SlotTag};
use crate::core::pipeline::frontend::Frontend;
use crate::core::units::FunctionalUnit;
use crate::isa::instruction::DecodedInstruction;
use crate::stats::SimStats;

/// One commit log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitRecord {
    /// Cycle in which the instruction retired.
    pub cycle: u64,
    /// What retired.
    pub retired: Retired,
}

/// Scheduler, units and frontend advanced in lockstep.
#[derive(Debug)]
pub struct Pipeline {
    scheduler: Scheduler,
    units: Vec<FunctionalUnit>,
    frontend: Frontend,
    stats: SimStats,
    /// Current cycle number (cycles completed so far).
    cycle: u64,
    dispatch_width: usize,
    commit_width: usize,
    trace_commits: bool,
    commit_log: Vec<CommitRecord>,
}

impl Pipeline {
    /// Builds a pipeline for `program` over initial register state `regs`.
    ///
    /// The configuration is assumed validated.
    pub fn new(config: &Config, program: Vec<DecodedInstruction>, regs: Gpr) -> Self {
        Self {
            scheduler: Scheduler::new(config.scheduler.window_size, regs),
            units: config.units.iter().map(FunctionalUnit::from_config).collect(),
            frontend: Frontend::new(program),
            stats: SimStats::default(),
            cycle: 0,
            dispatch_width: config.scheduler.dispatch_width.max(1),
            commit_width: config.scheduler.commit_width.max(1),
            trace_commits: config.general.trace_instructions,
            commit_log: Vec::new(),
        }
    }

    /// Runs one cycle.
    ///
    /// # Errors
    ///
    /// Propagates a scheduler invariant violation; the pipeline must not be
    /// ticked again afterwards.
    pub fn tick(&mut self) -> Result<(), SchedulerError> {
        let now = self.cycle;

        for _ in 0..self.commit_width {
            let Some(retired) = self.scheduler.commit() else {
                break;
            };
            self.stats.committed += 1;
            if self.trace_commits {
                debug!(
                    cycle = now,
                    seq = retired.seq,
                    instr = %retired.instr,
                    rd = ?retired.rd,
                    value = retired.value,
                    "retire"
                );
                self.commit_log.push(CommitRecord { cycle: now, retired });
            }
        }

        for unit in &mut self.units {
            for (tag, result) in unit.take_completed(now) {
                self.scheduler.complete(tag, result)?;
                self.stats.completed += 1;
            }
        }

        for unit in &mut self.units {
            if !unit.can_accept(now) {
                continue;
            }
            if let Some(op) = self.scheduler.issue(unit.capabilities()) {
                self.stats.record_issue(op.instr.opcode.class());
                unit.accept(op, now);
            }
        }

        for _ in 0..self.dispatch_width {
            let Some(instr) = self.frontend.peek() else {
                break;
            };
            if self.scheduler.dispatch(&instr).is_some() {
                self.frontend.advance();
                self.stats.dispatched += 1;
            } else {
                self.stats.dispatch_stalls += 1;
                break;
            }
        }

        self.cycle += 1;
        self.stats.cycles = self.cycle;
        Ok(())
    }

    /// Squashes `from` and everything younger: the scheduler drops the slots,
    /// the units drop their in-flight work, and the frontend replays the
    /// squashed instructions. Returns how many slots were squashed.
    ///
    /// # Errors
    ///
    /// Fails without changing any state if `from` is not in flight.
    pub fn flush(&mut self, from: SlotTag) -> Result<usize, SchedulerError> {
        let doomed: Vec<SlotTag> = self
            .scheduler
            .slots()
            .map(|s| s.tag)
            .skip_while(|&tag| tag != from)
            .collect();
        let squashed = self.scheduler.flush(from)?;
        debug_assert_eq!(squashed, doomed.len());
        self.discard(&doomed);
        Ok(squashed)
    }

    /// Squashes every in-flight instruction. Returns how many.
    pub fn flush_all(&mut self) -> usize {
        let doomed: Vec<SlotTag> = self.scheduler.slots().map(|s| s.tag).collect();
        let squashed = self.scheduler.flush_all();
        self.discard(&doomed);
        squashed
    }

    fn discard(&mut self, doomed: &[SlotTag]) {
        for unit in &mut self.units {
            let _ = unit.squash(doomed);
        }
        self.frontend.rewind(doomed.len());
        self.stats.flushed += doomed.len() as u64;
    }

    /// Whether the program has been dispatched and everything has retired.
    pub fn is_drained(&self) -> bool {
        self.frontend.is_done()
            && self.scheduler.is_empty()
            && self.units.iter().all(FunctionalUnit::is_idle)
    }

    /// Cycles run so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The scheduling core.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Execution resources in issue-priority order.
    pub fn units(&self) -> &[FunctionalUnit] {
        &self.units
    }

    /// The instruction source.
    pub fn frontend(&self) -> &Frontend {
        &self.frontend
    }

    /// Counters so far.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Retired instructions, when commit tracing is enabled.
    pub fn commit_log(&self) -> &[CommitRecord] {
        &self.commit_log
    }
}
