//! Random program generation and a sequential reference interpreter.

use proptest::prelude::*;

use o3sim_core::core::units::alu::Alu;
use o3sim_core::isa::{DecodedInstruction, Opcode};

/// Registers random programs draw from; small so dependencies are frequent.
pub const REGS: usize = 8;

const R_OPS: [Opcode; 11] = [
    Opcode::Add,
    Opcode::Sub,
    Opcode::And,
    Opcode::Or,
    Opcode::Xor,
    Opcode::Sll,
    Opcode::Srl,
    Opcode::Slt,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Rem,
];

/// Any instruction over `r0..r7`.
pub fn instruction() -> impl Strategy<Value = DecodedInstruction> {
    let reg = 0..REGS;
    prop_oneof![
        4 => (prop::sample::select(R_OPS.to_vec()), reg.clone(), reg.clone(), reg.clone())
            .prop_map(|(op, rd, rs1, rs2)| DecodedInstruction::r(op, rd, rs1, rs2)),
        2 => (reg.clone(), reg.clone(), -16i64..16)
            .prop_map(|(rd, rs1, imm)| DecodedInstruction::i(Opcode::Addi, rd, rs1, imm)),
        2 => (reg.clone(), any::<i64>()).prop_map(|(rd, imm)| DecodedInstruction::li(rd, imm)),
        1 => (reg.clone(), reg).prop_map(|(rd, rs1)| DecodedInstruction::mov(rd, rs1)),
        1 => Just(DecodedInstruction::nop()),
    ]
}

/// Runs `program` one instruction at a time over 32 registers.
pub fn interpret(program: &[DecodedInstruction]) -> Vec<u64> {
    let mut regs = vec![0u64; 32];
    for instr in program {
        let [a, b] = instr.sources().map(|r| r.map_or(0, |r| regs[r]));
        let value = Alu::execute(instr.opcode, a, b, instr.imm.unwrap_or(0));
        if let Some(rd) = instr.writes() {
            regs[rd] = value;
        }
    }
    regs
}
