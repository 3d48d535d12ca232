//! Instruction set tests.

pub mod instruction;
