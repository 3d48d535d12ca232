//! Instruction window: the fixed-capacity slot pool.
//!
//! The window is a circular buffer of [`Slot`]s that tracks in-flight
//! instructions from Dispatch through Commit. It provides:
//! 1. **Allocation:** Hands out the slot at `tail`; its index is the tag.
//! 2. **Lookup:** Resolves tags to occupied slots.
//! 3. **In-order Retirement:** Frees only the slot at `head`.
//! 4. **Age Order:** Iterates occupied slots oldest first.
//! 5. **Flush:** Squashes a tag and everything younger.
//!
//! Occupied slots always form one contiguous wrap-around run from `head` to
//! `tail`, so allocating at `tail` is equivalent to popping a free list.

use crate::core::pipeline::backend::o3::slot::{Slot, SlotTag};
use crate::isa::instruction::DecodedInstruction;

/// Fixed-capacity circular pool of instruction slots.
#[derive(Debug)]
pub struct SlotWindow {
    /// Slot storage; index == tag.
    slots: Vec<Slot>,
    /// Index of the oldest occupied slot (commit point).
    head: usize,
    /// Index the next allocation will use.
    tail: usize,
    /// Number of occupied slots.
    count: usize,
}

impl SlotWindow {
    /// Creates a window of `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(Slot::empty).collect(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the window capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.slots.len() - self.count
    }

    /// Tag of the oldest slot (meaningful only when non-empty).
    #[inline]
    pub fn head(&self) -> SlotTag {
        SlotTag::from(self.head)
    }

    /// Tag the next allocation will receive.
    #[inline]
    pub fn tail(&self) -> SlotTag {
        SlotTag::from(self.tail)
    }

    /// Whether `tag` names a position inside the window.
    #[inline]
    pub fn in_range(&self, tag: SlotTag) -> bool {
        tag.index() < self.slots.len()
    }

    /// Occupies the slot at `tail`. Returns `None` if the window is full.
    ///
    /// The new slot starts with both operands captured as 0, nothing pending
    /// and no state flags set; the caller fills in operand state.
    pub fn allocate(&mut self, instr: DecodedInstruction, seq: u64) -> Option<SlotTag> {
        if self.is_full() {
            return None;
        }

        let tag = SlotTag::from(self.tail);
        self.slots[self.tail] = Slot {
            tag,
            valid: true,
            instr,
            seq,
            ..Slot::default()
        };

        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
        Some(tag)
    }

    /// Returns the occupied slot named by `tag`.
    pub fn get(&self, tag: SlotTag) -> Option<&Slot> {
        self.slots.get(tag.index()).filter(|s| s.valid)
    }

    /// Returns the occupied slot named by `tag`, mutably.
    pub fn get_mut(&mut self, tag: SlotTag) -> Option<&mut Slot> {
        self.slots.get_mut(tag.index()).filter(|s| s.valid)
    }

    /// Returns the head slot, if the window is non-empty.
    pub fn peek_head(&self) -> Option<&Slot> {
        if self.count == 0 {
            None
        } else {
            Some(&self.slots[self.head])
        }
    }

    /// Frees the head slot and advances `head`. Returns the retired slot.
    ///
    /// Does not check the slot's state; Commit decides eligibility.
    pub fn retire_head(&mut self) -> Option<Slot> {
        if self.count == 0 {
            return None;
        }

        let retired = std::mem::replace(&mut self.slots[self.head], Slot::empty(self.head));
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        Some(retired)
    }

    /// Distance of `tag` from `head` in age order, if it is in flight.
    pub fn age(&self, tag: SlotTag) -> Option<usize> {
        if !self.in_range(tag) || self.count == 0 {
            return None;
        }
        let cap = self.slots.len();
        let offset = (tag.index() + cap - self.head) % cap;
        (offset < self.count && self.slots[tag.index()].valid).then_some(offset)
    }

    /// Occupied slots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> + '_ {
        let cap = self.slots.len();
        (0..self.count).map(move |i| &self.slots[(self.head + i) % cap])
    }

    /// Tags of occupied slots, oldest first.
    pub fn tags(&self) -> impl Iterator<Item = SlotTag> + '_ {
        self.iter().map(|s| s.tag)
    }

    /// Squashes `tag` and every younger slot; `tail` moves back to `tag`.
    ///
    /// Returns the squashed tags, oldest first. Empty if `tag` is not in flight.
    pub fn truncate_from(&mut self, tag: SlotTag) -> Vec<SlotTag> {
        let Some(keep) = self.age(tag) else {
            return Vec::new();
        };

        let cap = self.slots.len();
        let squashed: Vec<SlotTag> = (keep..self.count)
            .map(|i| SlotTag::from((self.head + i) % cap))
            .collect();
        for t in &squashed {
            self.slots[t.index()] = Slot::empty(t.index());
        }

        self.tail = tag.index();
        self.count = keep;
        squashed
    }

    /// Squashes every occupied slot. Returns the squashed tags, oldest first.
    pub fn flush_all(&mut self) -> Vec<SlotTag> {
        let squashed: Vec<SlotTag> = self.tags().collect();
        for t in &squashed {
            self.slots[t.index()] = Slot::empty(t.index());
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        squashed
    }
}
