//! Register Alias Table.
//!
//! Maps each architectural register to the slot tag of its latest in-flight
//! producer, or `None` ("resolved") if the committed register file holds the
//! current value. Overwriting a mapping at dispatch is what renames away
//! write-after-write and write-after-read hazards.

use crate::common::constants::ZERO_REG;
use crate::core::pipeline::backend::o3::slot::SlotTag;
use crate::core::pipeline::backend::o3::window::SlotWindow;

/// Architectural register → latest in-flight producer.
#[derive(Clone, Debug)]
pub struct RegisterAliasTable {
    /// `r0` is always `None` (hardwired zero).
    map: Vec<Option<SlotTag>>,
}

impl RegisterAliasTable {
    /// Create a table for `num_regs` registers, all resolved.
    pub fn new(num_regs: usize) -> Self {
        Self {
            map: vec![None; num_regs],
        }
    }

    /// Number of architectural registers covered.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table covers no registers.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Mark `reg` as produced by `tag`. No-op for `r0`.
    pub fn set_producer(&mut self, reg: usize, tag: SlotTag) {
        if reg != ZERO_REG {
            self.map[reg] = Some(tag);
        }
    }

    /// Latest in-flight producer of `reg`, or `None` if resolved.
    pub fn producer(&self, reg: usize) -> Option<SlotTag> {
        self.map.get(reg).copied().flatten()
    }

    /// Reset `reg` to resolved, but only if `tag` is still its producer.
    /// A committing instruction must not clear a mapping set by a younger
    /// dispatch to the same register.
    pub fn clear_if_match(&mut self, reg: usize, tag: SlotTag) {
        if let Some(entry) = self.map.get_mut(reg) {
            if *entry == Some(tag) {
                *entry = None;
            }
        }
    }

    /// Resolve every register.
    pub fn flush(&mut self) {
        self.map.fill(None);
    }

    /// Rebuild from the slots still in the window.
    ///
    /// After a partial flush some slots survive. The table is cleared and the
    /// survivors re-marked oldest to youngest so the latest writer wins.
    pub fn rebuild_from_window(&mut self, window: &SlotWindow) {
        self.flush();
        for slot in window.iter() {
            if let Some(rd) = slot.instr.writes() {
                self.map[rd] = Some(slot.tag);
            }
        }
    }

    /// Registers currently mapped to an in-flight producer.
    pub fn pending_registers(&self) -> impl Iterator<Item = (usize, SlotTag)> + '_ {
        self.map
            .iter()
            .enumerate()
            .filter_map(|(reg, tag)| tag.map(|t| (reg, t)))
    }
}
