//! Wakeup matrix.
//!
//! A slot×slot dependency bitmap: bit `[waiter][producer]` is set while
//! `waiter` is blocked on the result of `producer`. Completion of a producer
//! scans its column and releases every waiter independently, so no
//! associative search over waiting instructions is needed.
//!
//! The matrix keeps one bit plane per source operand port. An instruction that
//! names the same unfinished producer on both sources therefore holds two
//! bits, one per port, and the number of set bits in a row always equals the
//! waiter's pending count. The port also tells the broadcast which operand
//! receives the result.

use crate::common::constants::{NUM_SOURCES, WORD_BITS};
use crate::core::pipeline::backend::o3::slot::SlotTag;

/// Per-port slot×slot dependency bitmap.
#[derive(Clone, Debug)]
pub struct WakeupMatrix {
    /// Number of slots (rows and columns).
    size: usize,
    /// `u64` words per row.
    words: usize,
    /// One `size × words` bitmap per operand port, row-major.
    planes: [Vec<u64>; NUM_SOURCES],
}

impl WakeupMatrix {
    /// Creates an all-clear matrix for `size` slots.
    pub fn new(size: usize) -> Self {
        let words = size.div_ceil(WORD_BITS);
        Self {
            size,
            words,
            planes: std::array::from_fn(|_| vec![0; size * words]),
        }
    }

    /// Number of slots covered.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn locate(&self, waiter: SlotTag, producer: SlotTag) -> (usize, u64) {
        let col = producer.index();
        (
            waiter.index() * self.words + col / WORD_BITS,
            1u64 << (col % WORD_BITS),
        )
    }

    /// Records that operand `port` of `waiter` waits on `producer`.
    pub fn set(&mut self, port: usize, waiter: SlotTag, producer: SlotTag) {
        let (word, mask) = self.locate(waiter, producer);
        self.planes[port][word] |= mask;
    }

    /// Whether operand `port` of `waiter` waits on `producer`.
    pub fn is_set(&self, port: usize, waiter: SlotTag, producer: SlotTag) -> bool {
        let (word, mask) = self.locate(waiter, producer);
        self.planes[port][word] & mask != 0
    }

    /// Whether any operand of `waiter` waits on `producer`.
    pub fn waits_on(&self, waiter: SlotTag, producer: SlotTag) -> bool {
        (0..NUM_SOURCES).any(|port| self.is_set(port, waiter, producer))
    }

    /// Set bits in `waiter`'s row, across all ports.
    pub fn row_count(&self, waiter: SlotTag) -> u32 {
        let start = waiter.index() * self.words;
        self.planes
            .iter()
            .flat_map(|plane| &plane[start..start + self.words])
            .map(|w| w.count_ones())
            .sum()
    }

    /// Set bits in `producer`'s column, across all ports.
    pub fn column_count(&self, producer: SlotTag) -> usize {
        (0..self.size)
            .map(SlotTag::from)
            .map(|waiter| {
                (0..NUM_SOURCES)
                    .filter(|&port| self.is_set(port, waiter, producer))
                    .count()
            })
            .sum()
    }

    /// Clears `producer`'s column, calling `wake(waiter, port)` once for
    /// every bit that was set. Each bit is reported and cleared exactly once.
    pub fn broadcast(&mut self, producer: SlotTag, mut wake: impl FnMut(SlotTag, usize)) {
        let col = producer.index();
        let mask = 1u64 << (col % WORD_BITS);
        for waiter in 0..self.size {
            let word = waiter * self.words + col / WORD_BITS;
            for (port, plane) in self.planes.iter_mut().enumerate() {
                if plane[word] & mask != 0 {
                    plane[word] &= !mask;
                    wake(SlotTag::from(waiter), port);
                }
            }
        }
    }

    /// Clears every bit in `waiter`'s row.
    pub fn clear_row(&mut self, waiter: SlotTag) {
        let start = waiter.index() * self.words;
        for plane in &mut self.planes {
            plane[start..start + self.words].fill(0);
        }
    }

    /// Clears every bit in `producer`'s column without waking anyone.
    pub fn clear_column(&mut self, producer: SlotTag) {
        let col = producer.index();
        let mask = !(1u64 << (col % WORD_BITS));
        for waiter in 0..self.size {
            let word = waiter * self.words + col / WORD_BITS;
            for plane in &mut self.planes {
                plane[word] &= mask;
            }
        }
    }

    /// Clears the whole matrix.
    pub fn clear(&mut self) {
        for plane in &mut self.planes {
            plane.fill(0);
        }
    }
}
