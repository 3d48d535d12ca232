//! Error definitions.
//!
//! This module defines every error the simulator can report. It provides:
//! 1. **Scheduler Errors:** Invariant violations raised by the scheduling core.
//! 2. **Configuration Errors:** Rejected machine descriptions.
//! 3. **Parse Errors:** Malformed assembly listings.
//! 4. **Simulation Errors:** The top-level error returned by the simulator driver.
//!
//! Dispatch backpressure is not an error; it is reported as `None`
//! by [`Scheduler::dispatch`](crate::core::pipeline::backend::o3::Scheduler::dispatch).

use thiserror::Error;

use crate::common::constants::MAX_WINDOW;
use crate::core::pipeline::backend::o3::SlotTag;
use crate::isa::instruction::Opcode;

/// Invariant violations detected by the scheduling core.
///
/// Every variant means the surrounding system broke a contract (for example an
/// execution resource completing a tag it was never issued). The operation that
/// detected the violation leaves the scheduler untouched; callers are expected to
/// treat the error as fatal and stop the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The tag does not name a position inside the instruction window.
    #[error("slot tag {tag} is outside the window (capacity {capacity})")]
    TagOutOfRange {
        /// Offending tag.
        tag: SlotTag,
        /// Window capacity.
        capacity: usize,
    },

    /// The slot named by the tag is not occupied.
    #[error("slot {0} is not in flight")]
    NotInFlight(SlotTag),

    /// Completion was signalled for a slot that was never issued.
    #[error("slot {0} completed before it was issued")]
    NotIssued(SlotTag),

    /// Completion was signalled twice for the same slot.
    #[error("slot {0} completed twice")]
    AlreadyCompleted(SlotTag),
}

/// Errors produced while validating a [`Config`](crate::config::Config).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The instruction window must hold at least one slot.
    #[error("scheduler window size must be at least 1")]
    ZeroWindow,

    /// The instruction window exceeds the supported size.
    #[error("scheduler window size {0} exceeds the maximum of {max}", max = MAX_WINDOW)]
    WindowTooLarge(usize),

    /// Architectural register count outside the supported range.
    #[error("architectural register count {0} is outside 2..=256")]
    RegisterCount(usize),

    /// Dispatch or commit width of zero would never make progress.
    #[error("{0} width must be at least 1")]
    ZeroWidth(&'static str),

    /// No execution resources were described.
    #[error("at least one execution unit is required")]
    NoUnits,

    /// A unit advertised an empty capability set.
    #[error("execution unit '{0}' has no operation classes")]
    NoClasses(String),

    /// A unit declared a latency of zero cycles.
    #[error("execution unit '{0}' has zero latency")]
    ZeroLatency(String),
}

/// What went wrong on a line of an assembly listing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The mnemonic is not part of the instruction set.
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    /// A register operand could not be parsed.
    #[error("invalid register '{0}'")]
    BadRegister(String),

    /// An immediate operand could not be parsed.
    #[error("invalid immediate '{0}'")]
    BadImmediate(String),

    /// Wrong number of operands for the mnemonic.
    #[error("'{mnemonic}' takes {expected} operands, found {found}")]
    OperandCount {
        /// Mnemonic being parsed.
        mnemonic: String,
        /// Operands the format requires.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },

    /// The opcode's format requires a field that is absent.
    #[error("'{mnemonic}' requires field '{field}'")]
    MissingField {
        /// Mnemonic of the instruction.
        mnemonic: String,
        /// Missing field name.
        field: &'static str,
    },

    /// A field is set that the opcode's format does not use.
    #[error("'{mnemonic}' does not take field '{field}'")]
    UnexpectedField {
        /// Mnemonic of the instruction.
        mnemonic: String,
        /// Offending field name.
        field: &'static str,
    },
}

/// An assembly parse failure, tagged with its 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number (1 for single-instruction parses).
    pub line: usize,
    /// The failure.
    pub kind: ParseErrorKind,
}

/// Top-level error returned by the simulator driver and program loader.
#[derive(Debug, Error)]
pub enum SimError {
    /// The scheduling core reported an invariant violation.
    #[error("scheduler invariant violated: {0}")]
    Scheduler(#[from] SchedulerError),

    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The program listing could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A JSON program or configuration could not be decoded.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A program or configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The program uses an operation no configured unit can execute.
    #[error("no execution unit can run '{0}'")]
    NoUnitFor(Opcode),

    /// An instruction's fields do not match its opcode's format.
    #[error("instruction {index}: {kind}")]
    MalformedInstruction {
        /// Position of the instruction in the program.
        index: usize,
        /// What is wrong with it.
        kind: ParseErrorKind,
    },

    /// An instruction names a register the machine does not have.
    #[error("instruction {index} uses r{reg}, but only {count} registers are configured")]
    RegisterOutOfRange {
        /// Position of the instruction in the program.
        index: usize,
        /// Highest register the instruction names.
        reg: usize,
        /// Configured architectural register count.
        count: usize,
    },

    /// The pipeline did not drain within the configured cycle budget.
    #[error("simulation did not finish within {0} cycles")]
    CycleLimit(u64),
}
