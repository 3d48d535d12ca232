//! Instruction set.
//!
//! The scheduler never decodes machine words; it consumes already decoded
//! instructions. This module defines that decoded form and a small text
//! assembler for writing programs and tests.

/// Text assembler (`FromStr` for instructions, whole-listing parser).
pub mod asm;

/// Opcodes, operation classes, capability masks and decoded instructions.
pub mod instruction;

pub use asm::parse_program;
pub use instruction::{CapabilityMask, DecodedInstruction, OpClass, Opcode};
