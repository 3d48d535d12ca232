//! ALU bitwise and comparison operations.

use crate::isa::instruction::Opcode;

/// Executes a logical or comparison operation. Returns `0` for other opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    match op {
        Opcode::And => a & b,
        Opcode::Or => a | b,
        Opcode::Xor => a ^ b,
        Opcode::Slt => u64::from((a as i64) < (b as i64)),
        _ => 0,
    }
}
