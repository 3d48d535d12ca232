//! Instruction window slots.
//!
//! A slot is the lifecycle record of one in-flight instruction, from Dispatch
//! until Commit (or a flush). Its tag is its position in the window and stays
//! fixed while the slot is occupied.

use std::fmt;

use crate::common::constants::{MAX_WINDOW, NUM_SOURCES};
use crate::isa::instruction::DecodedInstruction;

/// Stable identity of an in-flight instruction: its index in the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SlotTag(pub u32);

impl SlotTag {
    /// Window index this tag names.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for SlotTag {
    fn from(index: usize) -> Self {
        debug_assert!(index < MAX_WINDOW, "slot index {index} beyond MAX_WINDOW");
        Self(index as u32)
    }
}

impl fmt::Display for SlotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A captured source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Value is known.
    Value(u64),
    /// Waiting on the result of the named producer.
    Pending(SlotTag),
}

impl Default for Operand {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl Operand {
    /// The value, if captured.
    pub const fn value(self) -> Option<u64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Pending(_) => None,
        }
    }

    /// Whether the operand still waits on a producer.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Lifecycle record of one in-flight instruction.
///
/// The state flags only move forward: ready → issued → completed.
/// `ready` holds exactly when `pending == 0`.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    /// Position of this slot in the window.
    pub tag: SlotTag,
    /// Whether the slot is occupied.
    pub valid: bool,
    /// Copy of the dispatched instruction.
    pub instr: DecodedInstruction,
    /// Captured source operands, in port order (`rs1`, `rs2`).
    pub operands: [Operand; NUM_SOURCES],
    /// Number of operands still waiting on a producer (0 to 2).
    pub pending: u8,
    /// All operands are available.
    pub ready: bool,
    /// Handed to an execution resource.
    pub issued: bool,
    /// Result is available.
    pub completed: bool,
    /// Result value, meaningful once `completed`.
    pub result: u64,
    /// Program-order sequence number assigned at dispatch.
    pub seq: u64,
}

impl Slot {
    /// An empty slot at `index`.
    pub fn empty(index: usize) -> Self {
        Self {
            tag: SlotTag::from(index),
            ..Self::default()
        }
    }

    /// Operand values; pending operands read as 0.
    pub fn operand_values(&self) -> [u64; NUM_SOURCES] {
        self.operands.map(|op| op.value().unwrap_or(0))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.completed {
            "completed"
        } else if self.issued {
            "issued"
        } else if self.ready {
            "ready"
        } else {
            "waiting"
        };
        write!(
            f,
            "{} seq={} [{}] {} pending={}",
            self.tag, self.seq, self.instr, state, self.pending
        )
    }
}
