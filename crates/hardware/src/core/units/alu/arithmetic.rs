//! ALU arithmetic operations.
//!
//! Division follows the RISC-V convention instead of trapping: dividing by
//! zero yields all ones (quotient) or the dividend (remainder), and the
//! signed overflow case `i64::MIN / -1` yields `i64::MIN` with remainder 0.

use crate::isa::instruction::Opcode;

/// Executes an integer arithmetic operation. Returns `0` for other opcodes.
pub fn execute(op: Opcode, a: u64, b: u64, imm: i64) -> u64 {
    match op {
        Opcode::Add => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Addi => a.wrapping_add(imm as u64),
        Opcode::Div => {
            let (dividend, divisor) = (a as i64, b as i64);
            if divisor == 0 {
                u64::MAX
            } else {
                dividend.wrapping_div(divisor) as u64
            }
        }
        Opcode::Rem => {
            let (dividend, divisor) = (a as i64, b as i64);
            if divisor == 0 {
                a
            } else {
                dividend.wrapping_rem(divisor) as u64
            }
        }
        _ => 0,
    }
}
