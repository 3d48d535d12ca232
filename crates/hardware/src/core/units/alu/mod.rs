//! Arithmetic Logic Unit (ALU).
//!
//! Computes results for issued instructions on behalf of the reference
//! execution resources. All arithmetic is 64-bit and wraps.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Rem, Addi
//! - [`logic`]:      And, Or, Xor, Slt
//! - [`shifts`]:     Sll, Srl

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::isa::instruction::Opcode;

/// Integer ALU.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes `op` on operands `a` (`rs1`), `b` (`rs2`) and `imm`.
    ///
    /// # Examples
    ///
    /// ```
    /// use o3sim_core::core::units::alu::Alu;
    /// use o3sim_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, 42, 8, 0), 50);
    /// assert_eq!(Alu::execute(Opcode::Addi, 42, 0, -2), 40);
    /// assert_eq!(Alu::execute(Opcode::Sll, 1, 4, 0), 0x10);
    /// assert_eq!(Alu::execute(Opcode::Slt, -5_i64 as u64, 10, 0), 1);
    /// assert_eq!(Alu::execute(Opcode::Div, 100, 0, 0), u64::MAX);
    /// ```
    pub fn execute(op: Opcode, a: u64, b: u64, imm: i64) -> u64 {
        match op {
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Rem
            | Opcode::Addi => arithmetic::execute(op, a, b, imm),

            Opcode::And | Opcode::Or | Opcode::Xor | Opcode::Slt => logic::execute(op, a, b),

            Opcode::Sll | Opcode::Srl => shifts::execute(op, a, b),

            Opcode::Li => imm as u64,
            Opcode::Mov => a,
            Opcode::Nop => 0,
        }
    }
}
