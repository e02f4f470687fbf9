use alloc::vec::Vec;

use crate::options::EstimateSize;

/// Minimum effective item size.
///
/// A zero estimate would make two items share an offset and break the strict
/// monotonicity of the offset table, so sizes are clamped to this floor.
pub const MIN_ITEM_SIZE: u32 = 1;

fn clamp_size(raw: u32) -> u32 {
    raw.max(MIN_ITEM_SIZE)
}

/// Per-index size, distinguishing a provisional estimate from an authoritative
/// measurement.
///
/// Once an index is `Measured`, only another measurement may replace the
/// value; re-estimation never downgrades it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeEntry {
    Estimated(u32),
    Measured(u32),
}

impl SizeEntry {
    pub fn get(self) -> u32 {
        match self {
            Self::Estimated(v) | Self::Measured(v) => v,
        }
    }

    pub fn is_measured(self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// Lifecycle phase of a ledger, derived from measurement coverage.
///
/// `EMPTY -> WARMING (sizes mostly estimated) -> STABLE (sizes mostly
/// measured)`, back to `EMPTY` on every collection change. There is no
/// terminal state and no explicit transition call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerPhase {
    Empty,
    Warming,
    Stable,
}

/// Tracks, per item index, an estimated or measured size plus cumulative
/// offsets, recomputed lazily.
///
/// The offset table is a prefix sum over `measured ?? estimated` sizes with a
/// clean-prefix watermark: `offsets[i]` is valid for `i < clean`, and a size
/// change at index `i` only invalidates offsets *after* `i`. Extending the
/// table costs O(k) in the distance from the watermark, never O(n) per call
/// once warm.
///
/// Each mounted list owns an independent ledger; nothing here is shared.
#[derive(Clone)]
pub struct SizeLedger {
    estimate: EstimateSize,
    /// Materialized entries, grown lazily up to the highest touched index.
    entries: Vec<SizeEntry>,
    len: usize,
    /// `offsets[i]` = start of item `i`; valid for `i < clean`.
    offsets: Vec<u64>,
    clean: usize,
    measured: usize,
    generation: u64,
}

impl SizeLedger {
    pub fn new(count: usize, estimate: EstimateSize) -> Self {
        Self {
            estimate,
            entries: Vec::new(),
            len: count,
            offsets: Vec::new(),
            clean: 0,
            measured: 0,
            generation: 0,
        }
    }

    pub fn from_fn(count: usize, estimate: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::new(count, alloc::sync::Arc::new(estimate))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of indices currently backed by a measurement.
    pub fn measured_count(&self) -> usize {
        self.measured
    }

    /// Monotonic counter bumped on every [`SizeLedger::reset`].
    ///
    /// Measurement callbacks captured before a reset carry a stale generation
    /// and must be dropped by the caller (see `Windower::measure_if_current`).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> LedgerPhase {
        if self.len == 0 {
            LedgerPhase::Empty
        } else if self.measured * 2 >= self.len {
            LedgerPhase::Stable
        } else {
            LedgerPhase::Warming
        }
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .map(|e| e.is_measured())
            .unwrap_or(false)
    }

    /// Current entry for `index`, materializing the estimate if needed.
    pub fn entry(&mut self, index: usize) -> Option<SizeEntry> {
        if index >= self.len {
            return None;
        }
        self.grow_to(index);
        Some(self.entries[index])
    }

    /// Effective size of item `index` (measured if available, else estimated).
    pub fn size(&mut self, index: usize) -> Option<u32> {
        self.entry(index).map(SizeEntry::get)
    }

    /// Cumulative offset of item `index`.
    ///
    /// `offset(0) == 0`; `offset(i) == offset(i - 1) + size(i - 1)`. Lazily
    /// recomputes the suffix of the offset table from the watermark forward.
    pub fn offset(&mut self, index: usize) -> Option<u64> {
        if index >= self.len {
            return None;
        }
        self.ensure_offset(index);
        Some(self.offsets[index])
    }

    /// Sum of effective sizes across all entries; 0 for an empty ledger.
    pub fn total_size(&mut self) -> u64 {
        if self.len == 0 {
            return 0;
        }
        let last = self.len - 1;
        self.ensure_offset(last);
        let size = self.entry_size(last) as u64;
        self.offsets[last].saturating_add(size)
    }

    /// Records a measured size for `index`.
    ///
    /// Idempotent: recording a value equal to the current effective size never
    /// dirties the offset table. Out-of-range indices are ignored (a stale
    /// callback targeting a ledger generation that no longer exists).
    ///
    /// Returns `true` iff the effective size changed (and offsets for indices
    /// after `index` were invalidated).
    pub fn record_measurement(&mut self, index: usize, size: u32) -> bool {
        if index >= self.len {
            wtrace!(index, size, len = self.len, "measurement ignored: out of range");
            return false;
        }
        let size = clamp_size(size);
        self.grow_to(index);
        let prev = self.entries[index];
        if prev.is_measured() && prev.get() == size {
            return false;
        }
        self.entries[index] = SizeEntry::Measured(size);
        if !prev.is_measured() {
            self.measured += 1;
        }
        if prev.get() == size {
            return false;
        }
        wtrace!(index, from = prev.get(), to = size, "measurement corrected size");
        // offsets[index] itself is still valid; everything after is stale
        self.clean = self.clean.min(index + 1);
        true
    }

    /// Maps an offset in `[0, total_size)` to the index of the item containing
    /// it, clamped to the last item for offsets at or past the end.
    ///
    /// Binary-searches the warm prefix of the offset table; degrades to a
    /// linear forward scan where offsets are not yet known (cheap, since cold
    /// regions use estimates).
    pub fn index_at_offset(&mut self, target: u64) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if self.clean > 0 {
            let warm = &self.offsets[..self.clean];
            let pos = warm.partition_point(|&o| o <= target);
            if pos < self.clean {
                // offsets[pos - 1] <= target < offsets[pos]
                return Some(pos - 1);
            }
        }
        let mut i = self.clean.saturating_sub(1);
        loop {
            self.ensure_offset(i);
            if i + 1 >= self.len {
                return Some(i);
            }
            self.ensure_offset(i + 1);
            if self.offsets[i + 1] > target {
                return Some(i);
            }
            i += 1;
        }
    }

    /// Drops all entries and offsets, keeping only the estimator, and bumps
    /// the generation.
    ///
    /// Called whenever the underlying item collection changes identity or
    /// length (new filter results, different route).
    pub fn reset(&mut self, new_count: usize) {
        wdebug!(
            old_len = self.len,
            new_len = new_count,
            dropped = self.measured,
            "ledger reset"
        );
        self.entries.clear();
        self.offsets.clear();
        self.clean = 0;
        self.measured = 0;
        self.len = new_count;
        self.generation = self.generation.wrapping_add(1);
    }

    fn entry_size(&mut self, index: usize) -> u32 {
        self.grow_to(index);
        self.entries[index].get()
    }

    fn grow_to(&mut self, index: usize) {
        debug_assert!(index < self.len);
        while self.entries.len() <= index {
            let i = self.entries.len();
            let est = clamp_size((self.estimate)(i));
            self.entries.push(SizeEntry::Estimated(est));
        }
    }

    fn ensure_offset(&mut self, index: usize) {
        debug_assert!(index < self.len);
        if self.clean > index {
            return;
        }
        if self.clean == 0 {
            if self.offsets.is_empty() {
                self.offsets.push(0);
            } else {
                self.offsets[0] = 0;
            }
            self.clean = 1;
        }
        while self.clean <= index {
            let i = self.clean;
            let size = self.entry_size(i - 1) as u64;
            let off = self.offsets[i - 1].saturating_add(size);
            if i < self.offsets.len() {
                self.offsets[i] = off;
            } else {
                self.offsets.push(off);
            }
            self.clean = i + 1;
        }
    }
}

impl core::fmt::Debug for SizeLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SizeLedger")
            .field("len", &self.len)
            .field("measured", &self.measured)
            .field("clean", &self.clean)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
