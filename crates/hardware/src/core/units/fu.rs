//! Functional units.
//!
//! A [`FunctionalUnit`] models one execution resource around the scheduler:
//! it advertises a capability filter, accepts issued operations, computes
//! their results with the [`Alu`], and hands them back once the configured
//! latency has elapsed. Each accepted operation completes exactly once.
//!
//! A pipelined unit accepts one new operation per cycle regardless of how
//! many are in flight. A non-pipelined unit is busy until its single
//! in-flight operation completes.

use std::collections::VecDeque;

use tracing::trace;

use crate::config::UnitConfig;
use crate::core::pipeline::backend::o3::{IssuedOp, SlotTag};
use crate::core::units::alu::Alu;
use crate::isa::instruction::CapabilityMask;

/// An operation executing inside a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct InFlight {
    tag: SlotTag,
    result: u64,
    /// Cycle whose Complete phase delivers the result.
    done_at: u64,
}

/// One execution resource.
#[derive(Clone, Debug)]
pub struct FunctionalUnit {
    name: String,
    caps: CapabilityMask,
    latency: u64,
    pipelined: bool,
    /// Oldest first. Latency is fixed, so `done_at` is non-decreasing.
    in_flight: VecDeque<InFlight>,
    /// Cycle of the most recent accept.
    last_accept: Option<u64>,
}

impl FunctionalUnit {
    /// Creates an idle unit.
    pub fn new(name: impl Into<String>, caps: CapabilityMask, latency: u64, pipelined: bool) -> Self {
        Self {
            name: name.into(),
            caps,
            latency: latency.max(1),
            pipelined,
            in_flight: VecDeque::new(),
            last_accept: None,
        }
    }

    /// Builds a unit from its configuration entry.
    pub fn from_config(config: &UnitConfig) -> Self {
        Self::new(
            config.name.as_str(),
            config.capabilities(),
            config.latency,
            config.pipelined,
        )
    }

    /// Unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation classes this unit executes.
    pub fn capabilities(&self) -> CapabilityMask {
        self.caps
    }

    /// Cycles from issue to completion.
    pub fn latency(&self) -> u64 {
        self.latency
    }

    /// Whether the unit overlaps operations.
    pub fn is_pipelined(&self) -> bool {
        self.pipelined
    }

    /// Operations currently executing.
    pub fn occupancy(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether nothing is executing.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Whether the unit can take a new operation in cycle `now`.
    pub fn can_accept(&self, now: u64) -> bool {
        if self.pipelined {
            self.last_accept != Some(now)
        } else {
            self.in_flight.is_empty()
        }
    }

    /// Starts executing `op` in cycle `now`. Its result becomes available
    /// in cycle `now + latency`.
    pub fn accept(&mut self, op: IssuedOp, now: u64) {
        debug_assert!(self.can_accept(now), "{} accepted while busy", self.name);
        let [a, b] = op.operands;
        let result = Alu::execute(op.instr.opcode, a, b, op.instr.imm.unwrap_or(0));
        let done_at = now + self.latency;
        trace!(unit = %self.name, tag = %op.tag, done_at, "execute");
        self.in_flight.push_back(InFlight {
            tag: op.tag,
            result,
            done_at,
        });
        self.last_accept = Some(now);
    }

    /// Removes and returns every `(tag, result)` whose latency has elapsed
    /// by cycle `now`, oldest first.
    pub fn take_completed(&mut self, now: u64) -> Vec<(SlotTag, u64)> {
        let mut done = Vec::new();
        while let Some(front) = self.in_flight.front() {
            if front.done_at > now {
                break;
            }
            done.push((front.tag, front.result));
            let _ = self.in_flight.pop_front();
        }
        done
    }

    /// Drops in-flight operations whose tag was squashed. Returns how many.
    pub fn squash(&mut self, squashed: &[SlotTag]) -> usize {
        let before = self.in_flight.len();
        self.in_flight.retain(|op| !squashed.contains(&op.tag));
        before - self.in_flight.len()
    }
}
