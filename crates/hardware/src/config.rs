//! Configuration system for the scheduling core simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! machine. It provides:
//! 1. **Defaults:** Baseline machine shape (window size, widths, units).
//! 2. **Structures:** Hierarchical config for general, scheduler and unit settings.
//! 3. **Validation:** [`Config::validate`] rejects machines that could never run.
//!
//! Configuration is supplied as JSON (every field optional) or via `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{DEFAULT_ARCH_REGS, MAX_ARCH_REGS, MAX_WINDOW};
use crate::common::error::ConfigError;
use crate::isa::instruction::{CapabilityMask, OpClass};

/// Default configuration constants.
mod defaults {
    /// Instruction window slots.
    pub const WINDOW_SIZE: usize = 16;

    /// Dispatch attempts per cycle.
    pub const DISPATCH_WIDTH: usize = 1;

    /// Commits per cycle.
    pub const COMMIT_WIDTH: usize = 1;

    /// Cycle budget before a run is declared hung.
    pub const MAX_CYCLES: u64 = 1_000_000;

    /// Simple integer ALU latency in cycles.
    pub const ALU_LATENCY: u64 = 1;

    /// Integer multiplier latency in cycles.
    pub const MUL_LATENCY: u64 = 3;

    /// Integer divider latency in cycles.
    pub const DIV_LATENCY: u64 = 12;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use o3sim_core::config::Config;
/// use o3sim_core::isa::OpClass;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "scheduler": { "window_size": 8 },
///     "units": [
///         { "name": "alu", "classes": ["IntAlu", "IntMul"], "latency": 2 }
///     ]
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.scheduler.window_size, 8);
/// assert_eq!(config.scheduler.arch_regs, 32);
/// assert_eq!(config.units[0].classes, vec![OpClass::IntAlu, OpClass::IntMul]);
/// assert!(config.units[0].pipelined);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Scheduler shape
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Execution resources, in issue-priority order
    #[serde(default = "Config::default_units")]
    pub units: Vec<UnitConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scheduler: SchedulerConfig::default(),
            units: Self::default_units(),
        }
    }
}

impl Config {
    /// Two ALUs, one pipelined multiplier, one blocking divider.
    fn default_units() -> Vec<UnitConfig> {
        vec![
            UnitConfig::new("alu0", &[OpClass::IntAlu], defaults::ALU_LATENCY, true),
            UnitConfig::new("alu1", &[OpClass::IntAlu], defaults::ALU_LATENCY, true),
            UnitConfig::new("mul", &[OpClass::IntMul], defaults::MUL_LATENCY, true),
            UnitConfig::new("div", &[OpClass::IntDiv], defaults::DIV_LATENCY, false),
        ]
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks that the described machine can make progress.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.validate()?;
        if self.units.is_empty() {
            return Err(ConfigError::NoUnits);
        }
        for unit in &self.units {
            if unit.classes.is_empty() {
                return Err(ConfigError::NoClasses(unit.name.clone()));
            }
            if unit.latency == 0 {
                return Err(ConfigError::ZeroLatency(unit.name.clone()));
            }
        }
        Ok(())
    }

    /// Union of every unit's capabilities.
    pub fn capabilities(&self) -> CapabilityMask {
        self.units
            .iter()
            .fold(CapabilityMask::NONE, |acc, u| acc | u.capabilities())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every retired instruction (commit log) at debug level and keep it
    /// for inspection after the run.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Cycle budget before a run is declared hung.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Shape of the scheduling core.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Instruction window slots
    #[serde(default = "SchedulerConfig::default_window_size")]
    pub window_size: usize,

    /// Architectural integer registers (including `r0`)
    #[serde(default = "SchedulerConfig::default_arch_regs")]
    pub arch_regs: usize,

    /// Dispatch attempts per cycle
    #[serde(default = "SchedulerConfig::default_dispatch_width")]
    pub dispatch_width: usize,

    /// Maximum commits per cycle
    #[serde(default = "SchedulerConfig::default_commit_width")]
    pub commit_width: usize,
}

impl SchedulerConfig {
    /// Returns the default window size.
    fn default_window_size() -> usize {
        defaults::WINDOW_SIZE
    }

    /// Returns the default architectural register count.
    fn default_arch_regs() -> usize {
        DEFAULT_ARCH_REGS
    }

    /// Returns the default dispatch width.
    fn default_dispatch_width() -> usize {
        defaults::DISPATCH_WIDTH
    }

    /// Returns the default commit width.
    fn default_commit_width() -> usize {
        defaults::COMMIT_WIDTH
    }

    /// Checks the scheduler shape.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.window_size > MAX_WINDOW {
            return Err(ConfigError::WindowTooLarge(self.window_size));
        }
        if !(2..=MAX_ARCH_REGS).contains(&self.arch_regs) {
            return Err(ConfigError::RegisterCount(self.arch_regs));
        }
        if self.dispatch_width == 0 {
            return Err(ConfigError::ZeroWidth("dispatch"));
        }
        if self.commit_width == 0 {
            return Err(ConfigError::ZeroWidth("commit"));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::WINDOW_SIZE,
            arch_regs: DEFAULT_ARCH_REGS,
            dispatch_width: defaults::DISPATCH_WIDTH,
            commit_width: defaults::COMMIT_WIDTH,
        }
    }
}

/// One execution resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitConfig {
    /// Name used in logs and errors
    pub name: String,

    /// Operation classes the unit accepts
    pub classes: Vec<OpClass>,

    /// Cycles from issue to completion
    #[serde(default = "UnitConfig::default_latency")]
    pub latency: u64,

    /// Whether the unit accepts a new operation every cycle
    #[serde(default = "UnitConfig::default_pipelined")]
    pub pipelined: bool,
}

impl UnitConfig {
    /// Builds a unit description.
    pub fn new(name: &str, classes: &[OpClass], latency: u64, pipelined: bool) -> Self {
        Self {
            name: name.to_string(),
            classes: classes.to_vec(),
            latency,
            pipelined,
        }
    }

    /// Returns the default unit latency.
    fn default_latency() -> u64 {
        defaults::ALU_LATENCY
    }

    /// Units are pipelined unless stated otherwise.
    fn default_pipelined() -> bool {
        true
    }

    /// The unit's issue filter.
    pub fn capabilities(&self) -> CapabilityMask {
        self.classes.iter().copied().collect()
    }
}
