//! End-to-end runs through the simulator.

use pretty_assertions::assert_eq;
use rstest::rstest;

use o3sim_core::common::{ConfigError, ParseErrorKind, SimError};
use o3sim_core::config::{Config, UnitConfig};
use o3sim_core::core::arch::Gpr;
use o3sim_core::isa::{DecodedInstruction, OpClass, Opcode, parse_program};
use o3sim_core::sim::Simulator;

use crate::common::{TestContext, li, mul, single_unit_config};

#[test]
fn test_dependent_chain_result() {
    let ctx = TestContext::new()
        .with_reg(1, 3)
        .with_reg(2, 4)
        .with_reg(4, 10)
        .load_asm("add r3, r1, r2\nmul r5, r3, r4\n")
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(ctx.get_reg(3), 7);
    assert_eq!(ctx.get_reg(5), 70);
}

#[test]
fn test_commit_log_is_program_order() {
    let ctx = TestContext::new()
        .with_widths(4, 4)
        .load_asm("div r1, r2, r3\nli r4, 1\nli r5, 2\nmul r6, r4, r5\n")
        .unwrap()
        .run()
        .unwrap();
    let seqs: Vec<u64> = ctx.commit_log().iter().map(|r| r.retired.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
    let cycles: Vec<u64> = ctx.commit_log().iter().map(|r| r.cycle).collect();
    assert!(cycles.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(ctx.get_reg(1), u64::MAX, "division by zero");
    assert_eq!(ctx.get_reg(6), 2);
}

#[test]
fn test_independent_work_overlaps_long_latency() {
    // The divide occupies its unit for 12 cycles; the adds behind it retire
    // right after it, having executed in its shadow.
    let listing = "div r1, r2, r3\n".to_string() + &"addi r4, r4, 1\n".repeat(6);
    let ctx = TestContext::new()
        .with_widths(2, 2)
        .load_asm(&listing)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(ctx.get_reg(4), 6);
    let div_commit = ctx.commit_log()[0].cycle;
    let last_commit = ctx.commit_log().last().unwrap().cycle;
    assert!(last_commit - div_commit <= 3, "{div_commit} -> {last_commit}");
}

#[test]
fn test_write_after_write_keeps_youngest() {
    let ctx = TestContext::new()
        .with_widths(4, 4)
        .load_asm("mul r1, r2, r2\nli r1, 5\nadd r2, r1, r1\n")
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.get_reg(2), 10);
}

#[rstest]
#[case(1, 1)]
#[case(1, 4)]
#[case(4, 1)]
#[case(8, 8)]
fn test_window_and_width_shapes_agree(#[case] window: usize, #[case] width: usize) {
    let ctx = TestContext::new()
        .with_window(window)
        .with_widths(width, width)
        .load_asm("li r1, 5\naddi r2, r1, -1\nmul r3, r1, r2\nrem r4, r3, r2\nsub r5, r3, r4\n")
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(ctx.get_reg(3), 20);
    assert_eq!(ctx.get_reg(4), 0);
    assert_eq!(ctx.get_reg(5), 20);
    assert_eq!(ctx.stats().committed, 5);
}

#[test]
fn test_empty_program_is_already_drained() {
    let mut sim = Simulator::new(&Config::default(), Vec::new()).unwrap();
    assert_eq!(sim.run().unwrap().cycles, 0);
}

#[test]
fn test_rejects_operation_without_unit() {
    let config = single_unit_config(1, true);
    let mut no_mul = config.clone();
    no_mul.units = vec![UnitConfig::new("alu", &[OpClass::IntAlu], 1, true)];
    let program = vec![li(1, 1), mul(2, 1, 1)];

    assert!(Simulator::new(&config, program.clone()).is_ok());
    assert!(matches!(
        Simulator::new(&no_mul, program),
        Err(SimError::NoUnitFor(Opcode::Mul))
    ));
}

#[test]
fn test_rejects_register_outside_configured_file() {
    let mut config = Config::default();
    config.scheduler.arch_regs = 8;
    let program = parse_program("li r1, 1\nadd r9, r1, r1\n").unwrap();
    assert!(matches!(
        Simulator::new(&config, program),
        Err(SimError::RegisterOutOfRange {
            index: 1,
            reg: 9,
            count: 8
        })
    ));
}

#[test]
fn test_rejects_nop_with_destination() {
    let nop_writing_r3 = DecodedInstruction {
        rd: Some(3),
        ..DecodedInstruction::nop()
    };
    let program = vec![li(3, 9), nop_writing_r3];
    match Simulator::new(&Config::default(), program) {
        Err(SimError::MalformedInstruction { index, kind }) => {
            assert_eq!(index, 1);
            assert_eq!(
                kind,
                ParseErrorKind::UnexpectedField {
                    mnemonic: "nop".into(),
                    field: "rd"
                }
            );
        }
        other => panic!("expected malformed instruction, got {other:?}"),
    }
}

#[test]
fn test_rejects_mismatched_register_file() {
    let config = Config::default();
    let result = Simulator::with_registers(&config, Vec::new(), Gpr::new(16));
    assert!(matches!(
        result,
        Err(SimError::Config(ConfigError::RegisterCount(16)))
    ));
}

#[test]
fn test_cycle_limit() {
    let mut config = Config::default();
    config.general.max_cycles = 5;
    let program = parse_program("div r1, r2, r3\n").unwrap();
    let mut sim = Simulator::new(&config, program).unwrap();
    assert!(matches!(sim.run(), Err(SimError::CycleLimit(5))));
    assert_eq!(sim.stats().cycles, 5);
}
