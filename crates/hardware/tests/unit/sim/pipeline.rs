//! Pipeline driver: any machine shape computes the sequential result, and
//! recovery replays squashed work without changing it.

use proptest::prelude::*;

use o3sim_core::config::{Config, UnitConfig};
use o3sim_core::core::arch::Gpr;
use o3sim_core::core::pipeline::Pipeline;
use o3sim_core::isa::OpClass;
use o3sim_core::SlotTag;

use crate::common::strategy::{instruction, interpret};

fn machine() -> impl Strategy<Value = Config> {
    (
        1usize..12,
        1usize..4,
        1usize..4,
        1u64..4,
        1u64..6,
        1u64..10,
        any::<bool>(),
    )
        .prop_map(|(window, dispatch, commit, alu, mul, div, shared)| {
            let mut config = Config::default();
            config.scheduler.window_size = window;
            config.scheduler.dispatch_width = dispatch;
            config.scheduler.commit_width = commit;
            config.units = if shared {
                vec![UnitConfig::new("any", &OpClass::ALL, alu, false)]
            } else {
                vec![
                    UnitConfig::new("alu", &[OpClass::IntAlu], alu, true),
                    UnitConfig::new("mul", &[OpClass::IntMul], mul, true),
                    UnitConfig::new("div", &[OpClass::IntDiv], div, false),
                ]
            };
            config
        })
}

fn drain(p: &mut Pipeline) {
    for _ in 0..100_000 {
        if p.is_drained() {
            return;
        }
        p.tick().unwrap();
    }
    panic!("pipeline did not drain");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_any_machine_matches_sequential_execution(
        program in prop::collection::vec(instruction(), 0..60),
        config in machine(),
    ) {
        let expected = interpret(&program);
        let mut p = Pipeline::new(&config, program.clone(), Gpr::new(32));
        drain(&mut p);

        prop_assert_eq!(p.scheduler().registers().values(), expected.as_slice());
        prop_assert_eq!(p.stats().committed, program.len() as u64);
        prop_assert_eq!(p.stats().dispatched, program.len() as u64);
    }

    #[test]
    fn prop_flush_and_replay_matches_sequential_execution(
        program in prop::collection::vec(instruction(), 1..40),
        config in machine(),
        flush_at in 0u64..30,
        pick in any::<usize>(),
    ) {
        let expected = interpret(&program);
        let mut p = Pipeline::new(&config, program.clone(), Gpr::new(32));
        for _ in 0..flush_at {
            if p.is_drained() {
                break;
            }
            p.tick().unwrap();
        }

        let live: Vec<SlotTag> = p.scheduler().slots().map(|s| s.tag).collect();
        if !live.is_empty() {
            let from = live[pick % live.len()];
            let squashed = p.flush(from).unwrap();
            prop_assert_eq!(squashed, live.len() - pick % live.len());
            prop_assert!(p.units().iter().all(|u| u.occupancy() <= live.len()));
        }
        drain(&mut p);

        prop_assert_eq!(p.scheduler().registers().values(), expected.as_slice());
        prop_assert_eq!(p.stats().committed, program.len() as u64);
    }
}
