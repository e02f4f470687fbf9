use alloc::vec::Vec;

use crate::ledger::{LedgerPhase, SizeLedger};
use crate::options::WindowerOptions;
use crate::{RenderItem, Viewport, Window};

/// Computes the contiguous index range that must be rendered for `viewport`.
///
/// - `start_index` is the item containing the (clamped) scroll offset.
/// - `end_index` is the item containing the last visible coordinate.
/// - Both bounds are expanded outward by `viewport.overscan` and clamped to
///   `[0, count - 1]`.
///
/// An empty ledger yields [`Window::EMPTY`]. A zero `visible_extent` over a
/// non-empty ledger degrades to a single-item window.
pub fn compute_window(viewport: Viewport, ledger: &mut SizeLedger) -> Window {
    let count = ledger.len();
    if count == 0 {
        return Window::EMPTY;
    }

    let total = ledger.total_size();
    let view = viewport.visible_extent as u64;
    let max_scroll = total.saturating_sub(view);
    let scroll = viewport.scroll_offset.min(max_scroll);
    // Last coordinate still inside the viewport, clamped into the list.
    let last_visible = scroll
        .saturating_add(view)
        .saturating_sub(1)
        .max(scroll)
        .min(total.saturating_sub(1));

    let start = ledger.index_at_offset(scroll).unwrap_or(0);
    let end = ledger
        .index_at_offset(last_visible)
        .unwrap_or(count - 1)
        .max(start);

    Window {
        start_index: start.saturating_sub(viewport.overscan),
        end_index: end.saturating_add(viewport.overscan).min(count - 1),
        total_size: total,
    }
}

/// A headless windowing engine.
///
/// Owns a [`SizeLedger`] plus the current [`Viewport`] reading, and turns them
/// into render instructions. It holds no UI objects: an adapter drives it by
/// feeding scroll offsets, viewport extents, and post-render measurements, and
/// renders whatever `for_each_render_item` emits at absolute positions.
///
/// For query filtering and debounced search state on top of this engine, see
/// the `windower-search` crate.
#[derive(Clone, Debug)]
pub struct Windower {
    ledger: SizeLedger,
    viewport: Viewport,
}

impl Windower {
    pub fn new(options: WindowerOptions) -> Self {
        wdebug!(
            count = options.count,
            overscan = options.viewport.overscan,
            "Windower::new"
        );
        Self {
            ledger: SizeLedger::new(options.count, options.estimate_size),
            viewport: options.viewport,
        }
    }

    pub fn count(&self) -> usize {
        self.ledger.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> LedgerPhase {
        self.ledger.phase()
    }

    /// Current ledger generation; capture it alongside a render pass so late
    /// measurement callbacks can be rejected after a reset.
    pub fn generation(&self) -> u64 {
        self.ledger.generation()
    }

    pub fn ledger(&self) -> &SizeLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut SizeLedger {
        &mut self.ledger
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        wtrace!(offset, "set_scroll_offset");
        self.viewport.scroll_offset = offset;
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    pub fn set_visible_extent(&mut self, visible_extent: u32) {
        self.viewport.visible_extent = visible_extent;
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.viewport.overscan = overscan;
    }

    pub fn total_size(&mut self) -> u64 {
        self.ledger.total_size()
    }

    pub fn max_scroll_offset(&mut self) -> u64 {
        let view = self.viewport.visible_extent as u64;
        self.ledger.total_size().saturating_sub(view)
    }

    pub fn clamp_scroll_offset(&mut self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn item_offset(&mut self, index: usize) -> Option<u64> {
        self.ledger.offset(index)
    }

    pub fn item_size(&mut self, index: usize) -> Option<u32> {
        self.ledger.size(index)
    }

    pub fn item(&mut self, index: usize) -> Option<RenderItem> {
        let offset = self.ledger.offset(index)?;
        let size = self.ledger.size(index)?;
        Some(RenderItem {
            index,
            offset,
            size,
        })
    }

    pub fn index_at_offset(&mut self, offset: u64) -> Option<usize> {
        self.ledger.index_at_offset(offset)
    }

    /// Feeds a post-render measurement into the ledger.
    ///
    /// Returns `true` iff the measurement corrected the effective size.
    /// Out-of-range indices are ignored.
    pub fn measure(&mut self, index: usize, size: u32) -> bool {
        self.ledger.record_measurement(index, size)
    }

    /// Like [`Windower::measure`], but rejects measurements captured against
    /// an older ledger generation (e.g. a callback that fired after a filter
    /// reset).
    pub fn measure_if_current(&mut self, generation: u64, index: usize, size: u32) -> bool {
        if generation != self.ledger.generation() {
            wtrace!(
                generation,
                current = self.ledger.generation(),
                index,
                "measurement ignored: stale generation"
            );
            return false;
        }
        self.measure(index, size)
    }

    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> bool {
        let mut corrected = false;
        for (index, size) in measurements {
            corrected |= self.measure(index, size);
        }
        corrected
    }

    /// Replaces the item collection: drops all measurements and offsets, bumps
    /// the generation, and clamps the scroll offset into the new extent.
    pub fn reset_items(&mut self, new_count: usize) {
        self.ledger.reset(new_count);
        let clamped = self.clamp_scroll_offset(self.viewport.scroll_offset);
        self.viewport.scroll_offset = clamped;
    }

    /// Window for the current viewport reading.
    pub fn window(&mut self) -> Window {
        compute_window(self.viewport, &mut self.ledger)
    }

    /// Window for an explicit viewport reading, leaving the stored one alone.
    pub fn window_for(&mut self, viewport: Viewport) -> Window {
        compute_window(viewport, &mut self.ledger)
    }

    /// Emits one render instruction per windowed item, without allocating.
    pub fn for_each_render_item(&mut self, mut f: impl FnMut(RenderItem)) {
        let window = self.window();
        if window.is_empty() {
            return;
        }
        let mut offset = self.ledger.offset(window.start_index).unwrap_or(0);
        for index in window.start_index..=window.end_index {
            let size = match self.ledger.size(index) {
                Some(s) => s,
                None => return,
            };
            f(RenderItem {
                index,
                offset,
                size,
            });
            offset = offset.saturating_add(size as u64);
        }
    }

    /// Collects render instructions into `out` (clears `out` first).
    pub fn collect_render_items(&mut self, out: &mut Vec<RenderItem>) {
        out.clear();
        self.for_each_render_item(|it| out.push(it));
    }

    /// One render frame with measurement feedback.
    ///
    /// Computes the window, hands every windowed item to `measure` (return
    /// `Some(actual)` once the item's rendered size is known, `None` to leave
    /// the estimate in place), and recomputes the window once if any
    /// measurement corrected an estimate. At most one corrective pass runs per
    /// call; there is no unbounded correction loop.
    pub fn render_pass(&mut self, mut measure: impl FnMut(RenderItem) -> Option<u32>) -> Window {
        let window = self.window();
        if window.is_empty() {
            return window;
        }
        let mut items = Vec::new();
        self.collect_render_items(&mut items);
        let mut corrected = false;
        for it in items {
            if let Some(size) = measure(it) {
                corrected |= self.measure(it.index, size);
            }
        }
        if corrected {
            wtrace!("render_pass: measurements corrected estimates, recomputing window");
            self.window()
        } else {
            window
        }
    }
}
