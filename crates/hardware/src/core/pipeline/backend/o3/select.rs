//! Oldest-ready select.
//!
//! Picks the instruction an execution resource should run next: the oldest
//! occupied slot, walking from `head` in circular order, that is ready, not
//! yet issued, and whose operation class the resource accepts. Favoring age
//! bounds starvation; an old instruction can never be passed over forever.

use crate::core::pipeline::backend::o3::slot::{Slot, SlotTag};
use crate::core::pipeline::backend::o3::window::SlotWindow;
use crate::isa::instruction::CapabilityMask;

/// Whether `slot` may be issued to a resource with capabilities `caps`.
#[inline]
pub fn is_eligible(slot: &Slot, caps: CapabilityMask) -> bool {
    slot.valid && slot.ready && !slot.issued && caps.accepts(&slot.instr)
}

/// Returns the oldest eligible slot, if any. Does not mark it issued.
pub fn select_oldest_ready(window: &SlotWindow, caps: CapabilityMask) -> Option<SlotTag> {
    if caps.is_empty() {
        return None;
    }
    window.iter().find(|s| is_eligible(s, caps)).map(|s| s.tag)
}
