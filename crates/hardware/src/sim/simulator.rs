//! Simulator: validated configuration, program and pipeline side by side.

use tracing::info;

use crate::common::error::{ConfigError, SimError};
use crate::config::Config;
use crate::core::arch::Gpr;
use crate::core::pipeline::{CommitRecord, Pipeline};
use crate::isa::instruction::DecodedInstruction;
use crate::stats::SimStats;

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    pipeline: Pipeline,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator with every register zero.
    ///
    /// # Errors
    ///
    /// See [`Self::with_registers`].
    pub fn new(config: &Config, program: Vec<DecodedInstruction>) -> Result<Self, SimError> {
        Self::with_registers(config, program, Gpr::new(config.scheduler.arch_regs))
    }

    /// Creates a simulator over initial register state `regs`.
    ///
    /// # Errors
    ///
    /// Rejects an invalid configuration, an instruction whose fields do not
    /// match its format, a register file whose size differs
    /// from the configured count, an instruction naming a register outside
    /// that range, and an operation no configured unit can execute (which
    /// would otherwise stall the machine forever).
    pub fn with_registers(
        config: &Config,
        program: Vec<DecodedInstruction>,
        regs: Gpr,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let count = config.scheduler.arch_regs;
        if regs.len() != count {
            return Err(ConfigError::RegisterCount(regs.len()).into());
        }

        let caps = config.capabilities();
        for (index, instr) in program.iter().enumerate() {
            instr
                .validate()
                .map_err(|kind| SimError::MalformedInstruction { index, kind })?;
            if !caps.accepts(instr) {
                return Err(SimError::NoUnitFor(instr.opcode));
            }
            if let Some(reg) = instr.max_register().filter(|&r| r >= count) {
                return Err(SimError::RegisterOutOfRange { index, reg, count });
            }
        }

        info!(
            instructions = program.len(),
            window = config.scheduler.window_size,
            units = config.units.len(),
            "simulator ready"
        );
        Ok(Self {
            pipeline: Pipeline::new(config, program, regs),
            max_cycles: config.general.max_cycles,
        })
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates a scheduler invariant violation.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.pipeline.tick()?;
        Ok(())
    }

    /// Runs until the program has fully retired.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if the machine has not drained after
    /// `max_cycles`, or a scheduler invariant violation.
    pub fn run(&mut self) -> Result<&SimStats, SimError> {
        while !self.pipeline.is_drained() {
            if self.pipeline.cycle() >= self.max_cycles {
                return Err(SimError::CycleLimit(self.max_cycles));
            }
            self.pipeline.tick()?;
        }
        let stats = self.pipeline.stats();
        info!(
            cycles = stats.cycles,
            committed = stats.committed,
            ipc = stats.ipc(),
            "simulation finished"
        );
        Ok(stats)
    }

    /// Committed architectural registers.
    pub fn registers(&self) -> &Gpr {
        self.pipeline.scheduler().registers()
    }

    /// Counters so far.
    pub fn stats(&self) -> &SimStats {
        self.pipeline.stats()
    }

    /// Retired instructions with cycle stamps (empty unless
    /// `general.trace_instructions` is set).
    pub fn commit_log(&self) -> &[CommitRecord] {
        self.pipeline.commit_log()
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable access for recovery experiments (`flush`).
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }
}
