//! Opcodes, operation classes, capability masks and the decoded form.

use pretty_assertions::assert_eq;
use rstest::rstest;

use o3sim_core::isa::{CapabilityMask, DecodedInstruction, OpClass, Opcode};

#[rstest]
#[case(Opcode::Add, OpClass::IntAlu)]
#[case(Opcode::Sll, OpClass::IntAlu)]
#[case(Opcode::Li, OpClass::IntAlu)]
#[case(Opcode::Mul, OpClass::IntMul)]
#[case(Opcode::Div, OpClass::IntDiv)]
#[case(Opcode::Rem, OpClass::IntDiv)]
fn test_opcode_class(#[case] op: Opcode, #[case] class: OpClass) {
    assert_eq!(op.class(), class);
    assert!(CapabilityMask::only(class).accepts(&DecodedInstruction::r(op, 1, 2, 3)));
}

#[test]
fn test_mnemonics_are_unique_and_resolvable() {
    for op in Opcode::ALL {
        assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
    }
    assert_eq!(Opcode::from_mnemonic("jal"), None);
}

#[test]
fn test_capability_mask_set_operations() {
    let alu_div = CapabilityMask::only(OpClass::IntAlu) | CapabilityMask::only(OpClass::IntDiv);
    assert!(alu_div.contains(OpClass::IntAlu));
    assert!(!alu_div.contains(OpClass::IntMul));
    assert_eq!(alu_div.to_string(), "{IntAlu,IntDiv}");
    assert_eq!(CapabilityMask::NONE.to_string(), "{}");
    assert!(CapabilityMask::NONE.is_empty());
    assert_eq!(OpClass::ALL.into_iter().collect::<CapabilityMask>(), CapabilityMask::ALL);
}

#[test]
fn test_sources_and_destination() {
    let instr = DecodedInstruction::i(Opcode::Addi, 4, 2, 1);
    assert_eq!(instr.sources(), [Some(2), None]);
    assert_eq!(instr.writes(), Some(4));
    assert_eq!(instr.max_register(), Some(4));

    assert_eq!(DecodedInstruction::r(Opcode::Add, 0, 1, 2).writes(), None);
    assert_eq!(DecodedInstruction::nop().sources(), [None, None]);
    assert_eq!(DecodedInstruction::nop().max_register(), None);
}

#[test]
fn test_json_form() {
    let instr = DecodedInstruction::r(Opcode::Mul, 5, 3, 4);
    let json = serde_json::to_value(instr).unwrap();
    assert_eq!(json["opcode"], "mul");
    assert_eq!(json["rd"], 5);

    let li: DecodedInstruction = serde_json::from_str(r#"{"opcode":"li","rd":1,"imm":-2}"#).unwrap();
    assert_eq!(li, DecodedInstruction::li(1, -2));
}
