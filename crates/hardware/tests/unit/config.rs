//! # Configuration Tests
//!
//! Defaults, partial JSON deserialization and validation.

use pretty_assertions::assert_eq;
use rstest::rstest;

use o3sim_core::common::ConfigError;
use o3sim_core::common::constants::MAX_WINDOW;
use o3sim_core::config::*;
use o3sim_core::isa::{CapabilityMask, OpClass};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_cycles, 1_000_000);
    assert_eq!(config.scheduler.window_size, 16);
    assert_eq!(config.scheduler.arch_regs, 32);
    assert_eq!(config.scheduler.dispatch_width, 1);
    assert_eq!(config.scheduler.commit_width, 1);
    assert_eq!(
        config.units.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["alu0", "alu1", "mul", "div"]
    );
    assert!(!config.units[3].pipelined);
    assert_eq!(config.capabilities(), CapabilityMask::ALL);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = Config::from_json(r#"{ "scheduler": { "dispatch_width": 4 } }"#).unwrap();
    assert_eq!(config.scheduler.dispatch_width, 4);
    assert_eq!(config.scheduler.window_size, 16);
    assert_eq!(config.units.len(), 4);
    assert_eq!(config.general.max_cycles, 1_000_000);
}

#[test]
fn test_unit_defaults() {
    let config =
        Config::from_json(r#"{ "units": [ { "name": "u", "classes": ["IntMul"] } ] }"#).unwrap();
    assert_eq!(
        config.units,
        vec![UnitConfig::new("u", &[OpClass::IntMul], 1, true)]
    );
    assert_eq!(config.capabilities(), CapabilityMask::only(OpClass::IntMul));
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(Config::from_json(r#"{ "scheduler": { "window_size": -1 } }"#).is_err());
    assert!(Config::from_json(r#"{ "units": [ { "name": "u", "classes": ["Fpu"] } ] }"#).is_err());
}

#[rstest]
#[case(r#"{ "scheduler": { "window_size": 0 } }"#, ConfigError::ZeroWindow)]
#[case(r#"{ "scheduler": { "window_size": 4097 } }"#, ConfigError::WindowTooLarge(4097))]
#[case(r#"{ "scheduler": { "arch_regs": 1 } }"#, ConfigError::RegisterCount(1))]
#[case(r#"{ "scheduler": { "arch_regs": 257 } }"#, ConfigError::RegisterCount(257))]
#[case(r#"{ "scheduler": { "dispatch_width": 0 } }"#, ConfigError::ZeroWidth("dispatch"))]
#[case(r#"{ "scheduler": { "commit_width": 0 } }"#, ConfigError::ZeroWidth("commit"))]
#[case(r#"{ "units": [] }"#, ConfigError::NoUnits)]
#[case(r#"{ "units": [ { "name": "idle", "classes": [] } ] }"#, ConfigError::NoClasses("idle".into()))]
#[case(
    r#"{ "units": [ { "name": "instant", "classes": ["IntAlu"], "latency": 0 } ] }"#,
    ConfigError::ZeroLatency("instant".into())
)]
fn test_validation_rejects(#[case] json: &str, #[case] expected: ConfigError) {
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.validate(), Err(expected));
}

#[test]
fn test_large_window_is_valid() {
    let mut config = Config::default();
    config.scheduler.window_size = MAX_WINDOW;
    config.scheduler.arch_regs = 256;
    assert_eq!(config.validate(), Ok(()));
}
