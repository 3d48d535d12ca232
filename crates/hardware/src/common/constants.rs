//! System-wide constants.

/// Number of source operands an instruction may name.
pub const NUM_SOURCES: usize = 2;

/// Architectural register hard-wired to zero.
pub const ZERO_REG: usize = 0;

/// Default number of architectural integer registers (`r0`-`r31`).
pub const DEFAULT_ARCH_REGS: usize = 32;

/// Largest architectural register file the assembler can name.
pub const MAX_ARCH_REGS: usize = 256;

/// Largest instruction window; bounds the wakeup matrix and keeps slot
/// indices within a `u32` tag.
pub const MAX_WINDOW: usize = 4096;

/// Bits per wakeup matrix word.
pub const WORD_BITS: usize = u64::BITS as usize;
