//! ALU shift operations.
//!
//! Shift amounts are masked to 6 bits (0-63).

use crate::isa::instruction::Opcode;

/// Bit mask for the shift amount (6 bits: 0-63).
const SHAMT_MASK: u64 = 0x3f;

/// Executes a shift operation. Returns `0` for other opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    let sh = (b & SHAMT_MASK) as u32;
    match op {
        Opcode::Sll => a << sh,
        Opcode::Srl => a >> sh,
        _ => 0,
    }
}
