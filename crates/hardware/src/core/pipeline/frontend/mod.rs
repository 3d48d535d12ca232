//! Instruction supply for the pipeline driver.
//!
//! The frontend stands in for fetch and decode: it walks an already decoded
//! program in order. An instruction stays at the front until the scheduler
//! accepts it, so a refused dispatch is retried unmodified next cycle.

use crate::isa::instruction::DecodedInstruction;

/// In-order instruction source.
#[derive(Clone, Debug, Default)]
pub struct Frontend {
    program: Vec<DecodedInstruction>,
    /// Index of the next instruction to dispatch.
    pc: usize,
}

impl Frontend {
    /// Creates a frontend positioned at the first instruction.
    pub fn new(program: Vec<DecodedInstruction>) -> Self {
        Self { program, pc: 0 }
    }

    /// The instruction waiting to be dispatched, if any.
    pub fn peek(&self) -> Option<DecodedInstruction> {
        self.program.get(self.pc).copied()
    }

    /// Consumes the instruction returned by [`Self::peek`].
    pub fn advance(&mut self) {
        if self.pc < self.program.len() {
            self.pc += 1;
        }
    }

    /// Steps back over the last `count` dispatched instructions so they are
    /// supplied again after a flush.
    pub fn rewind(&mut self, count: usize) {
        self.pc = self.pc.saturating_sub(count);
    }

    /// Index of the next instruction to dispatch.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Whether every instruction has been dispatched.
    pub fn is_done(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// The whole program.
    pub fn program(&self) -> &[DecodedInstruction] {
        &self.program
    }
}
