//! Out-of-order scheduling core.
//!
//! The [`Scheduler`] owns every piece of speculative state and exposes the
//! four lifecycle transitions of an instruction:
//! 1. **Dispatch:** Allocate a slot, read or rename sources through the RAT,
//!    record unresolved dependencies in the wakeup matrix, rename the destination.
//! 2. **Issue:** Hand the oldest ready instruction to a compatible resource.
//! 3. **Complete:** Capture a result and broadcast it to every waiter.
//! 4. **Commit:** Retire the head slot into the committed register file.
//!
//! Plus the recovery hook [`Scheduler::flush`], which squashes a slot and
//! everything younger.

/// Register Alias Table.
pub mod rat;

/// Oldest-ready issue arbitration.
pub mod select;

/// Slot records and tags.
pub mod slot;

/// Wakeup matrix.
pub mod wakeup;

/// Circular slot pool with head/tail retirement pointers.
pub mod window;

pub use rat::RegisterAliasTable;
pub use slot::{Operand, Slot, SlotTag};
pub use wakeup::WakeupMatrix;
pub use window::SlotWindow;

use tracing::{debug, trace};

use crate::common::constants::{NUM_SOURCES, ZERO_REG};
use crate::common::error::SchedulerError;
use crate::config::SchedulerConfig;
use crate::core::arch::Gpr;
use crate::isa::instruction::{CapabilityMask, DecodedInstruction};

/// An instruction handed to an execution resource by [`Scheduler::issue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuedOp {
    /// Tag to pass back to [`Scheduler::complete`].
    pub tag: SlotTag,
    /// The instruction to execute.
    pub instr: DecodedInstruction,
    /// Source operand values, `rs1` then `rs2` (0 where absent).
    pub operands: [u64; NUM_SOURCES],
}

/// Record of one retired instruction, returned by [`Scheduler::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Slot the instruction occupied.
    pub tag: SlotTag,
    /// Program-order sequence number.
    pub seq: u64,
    /// The instruction.
    pub instr: DecodedInstruction,
    /// Architectural register written, if any (never `r0`).
    pub rd: Option<usize>,
    /// Result value.
    pub value: u64,
}

/// Out-of-order scheduler: instruction window, RAT, wakeup matrix and the
/// committed register file.
#[derive(Debug)]
pub struct Scheduler {
    window: SlotWindow,
    rat: RegisterAliasTable,
    matrix: WakeupMatrix,
    regs: Gpr,
    /// Sequence number of the next dispatch.
    next_seq: u64,
}

impl Scheduler {
    /// Creates a scheduler with a window of `capacity` slots over the given
    /// initial architectural state.
    pub fn new(capacity: usize, regs: Gpr) -> Self {
        Self {
            window: SlotWindow::new(capacity),
            rat: RegisterAliasTable::new(regs.len()),
            matrix: WakeupMatrix::new(capacity),
            regs,
            next_seq: 0,
        }
    }

    /// Creates a scheduler shaped by `config` with all registers zero.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.window_size, Gpr::new(config.arch_regs))
    }

    /// Window capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Occupied slot count.
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether no instruction is in flight.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Whether the next dispatch would be refused.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Oldest in-flight tag (next commit candidate).
    pub fn head(&self) -> SlotTag {
        self.window.head()
    }

    /// Tag the next dispatch will receive.
    pub fn tail(&self) -> SlotTag {
        self.window.tail()
    }

    /// The occupied slot named by `tag`.
    pub fn slot(&self, tag: SlotTag) -> Option<&Slot> {
        self.window.get(tag)
    }

    /// Occupied slots, oldest first.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.window.iter()
    }

    /// The register alias table.
    pub fn rat(&self) -> &RegisterAliasTable {
        &self.rat
    }

    /// The wakeup matrix.
    pub fn matrix(&self) -> &WakeupMatrix {
        &self.matrix
    }

    /// Committed architectural registers.
    pub fn registers(&self) -> &Gpr {
        &self.regs
    }

    /// Reads one committed architectural register.
    pub fn committed(&self, reg: usize) -> u64 {
        self.regs.read(reg)
    }

    /// Accepts `instr` into the window.
    ///
    /// Returns the new slot's tag, or `None` when the window is full. A refusal
    /// is backpressure: the caller keeps the instruction and retries it
    /// unchanged on a later cycle.
    ///
    /// Sources are resolved before the destination is renamed, so an
    /// instruction that reads its own destination sees the previous producer.
    pub fn dispatch(&mut self, instr: &DecodedInstruction) -> Option<SlotTag> {
        if self.window.is_full() {
            debug!(instr = %instr, "dispatch refused: window full");
            return None;
        }

        let operands = instr.sources().map(|src| self.resolve(src));
        let seq = self.next_seq;
        let tag = self.window.allocate(*instr, seq)?;
        self.next_seq += 1;

        debug_assert_eq!(self.matrix.row_count(tag), 0, "stale wakeup bits on {tag}");

        let mut pending = 0u8;
        for (port, operand) in operands.iter().enumerate() {
            if let Operand::Pending(producer) = *operand {
                self.matrix.set(port, tag, producer);
                pending += 1;
            }
        }

        if let Some(rd) = instr.writes() {
            self.rat.set_producer(rd, tag);
        }

        if let Some(slot) = self.window.get_mut(tag) {
            slot.operands = operands;
            slot.pending = pending;
            slot.ready = pending == 0;
        }

        trace!(%tag, seq, instr = %instr, pending, "dispatch");
        Some(tag)
    }

    /// Binds one source register to a value or to its pending producer.
    fn resolve(&self, src: Option<usize>) -> Operand {
        let Some(reg) = src.filter(|&r| r != ZERO_REG) else {
            return Operand::Value(0);
        };
        match self.rat.producer(reg) {
            None => Operand::Value(self.regs.read(reg)),
            Some(producer) => match self.window.get(producer) {
                Some(slot) if slot.completed => Operand::Value(slot.result),
                Some(_) => Operand::Pending(producer),
                None => {
                    debug_assert!(false, "RAT maps r{reg} to free slot {producer}");
                    Operand::Value(self.regs.read(reg))
                }
            },
        }
    }

    /// Selects the oldest ready instruction `caps` accepts and marks it issued.
    ///
    /// Calls within one cycle are sequential, so a slot is never issued twice.
    pub fn issue(&mut self, caps: CapabilityMask) -> Option<IssuedOp> {
        let tag = select::select_oldest_ready(&self.window, caps)?;
        let slot = self.window.get_mut(tag)?;
        slot.issued = true;

        trace!(%tag, seq = slot.seq, instr = %slot.instr, caps = %caps, "issue");
        Some(IssuedOp {
            tag,
            instr: slot.instr,
            operands: slot.operand_values(),
        })
    }

    /// Records `result` for `tag` and wakes every slot waiting on it.
    ///
    /// # Errors
    ///
    /// Fails without changing any state if `tag` is out of range, unoccupied,
    /// not yet issued, or already completed.
    pub fn complete(&mut self, tag: SlotTag, result: u64) -> Result<(), SchedulerError> {
        self.check_tag(tag)?;
        let slot = self
            .window
            .get_mut(tag)
            .ok_or(SchedulerError::NotInFlight(tag))?;
        if slot.completed {
            return Err(SchedulerError::AlreadyCompleted(tag));
        }
        if !slot.issued {
            return Err(SchedulerError::NotIssued(tag));
        }
        slot.result = result;
        slot.completed = true;
        trace!(%tag, seq = slot.seq, result, "complete");

        let window = &mut self.window;
        self.matrix.broadcast(tag, |waiter, port| {
            let Some(slot) = window.get_mut(waiter) else {
                return;
            };
            debug_assert_eq!(slot.operands[port], Operand::Pending(tag));
            debug_assert!(slot.pending > 0, "pending underflow on {waiter}");
            slot.operands[port] = Operand::Value(result);
            slot.pending -= 1;
            if slot.pending == 0 {
                slot.ready = true;
                trace!(tag = %waiter, producer = %tag, "wakeup");
            }
        });
        Ok(())
    }

    /// Retires the head slot if it has completed.
    ///
    /// Younger slots never retire ahead of an incomplete older one, which is
    /// what keeps architectural updates precise.
    pub fn commit(&mut self) -> Option<Retired> {
        if !self.window.peek_head()?.completed {
            return None;
        }
        let slot = self.window.retire_head()?;

        let rd = slot.instr.writes();
        if let Some(rd) = rd {
            self.regs.write(rd, slot.result);
            self.rat.clear_if_match(rd, slot.tag);
        }

        trace!(tag = %slot.tag, seq = slot.seq, instr = %slot.instr, value = slot.result, "commit");
        Some(Retired {
            tag: slot.tag,
            seq: slot.seq,
            instr: slot.instr,
            rd,
            value: slot.result,
        })
    }

    /// Squashes `from` and every younger slot; `tail` moves back to `from`.
    ///
    /// RAT mappings are rebuilt from the surviving slots. Survivors cannot
    /// depend on squashed slots (dependencies only point to older slots), so
    /// their pending state is unchanged. Returns how many slots were squashed.
    ///
    /// # Errors
    ///
    /// Fails without changing any state if `from` is out of range or not in flight.
    pub fn flush(&mut self, from: SlotTag) -> Result<usize, SchedulerError> {
        self.check_tag(from)?;
        if self.window.age(from).is_none() {
            return Err(SchedulerError::NotInFlight(from));
        }

        let squashed = self.window.truncate_from(from);
        for &tag in &squashed {
            self.matrix.clear_row(tag);
            self.matrix.clear_column(tag);
        }
        self.rat.rebuild_from_window(&self.window);
        self.next_seq -= squashed.len() as u64;

        debug!(from = %from, squashed = squashed.len(), "flush");
        Ok(squashed.len())
    }

    /// Squashes every in-flight slot. Returns how many were squashed.
    pub fn flush_all(&mut self) -> usize {
        let squashed = self.window.flush_all();
        self.matrix.clear();
        self.rat.flush();
        self.next_seq -= squashed.len() as u64;
        debug!(squashed = squashed.len(), "flush all");
        squashed.len()
    }

    fn check_tag(&self, tag: SlotTag) -> Result<(), SchedulerError> {
        if self.window.in_range(tag) {
            Ok(())
        } else {
            Err(SchedulerError::TagOutOfRange {
                tag,
                capacity: self.window.capacity(),
            })
        }
    }
}
