use alloc::vec::Vec;

use windower::{Viewport, Window, Windower, WindowerOptions};

use crate::debounce::DebouncedQuery;
use crate::filter::{MatchDetail, MatchResult, QueryFilter};

/// One windowed result row, ready to render.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a, T> {
    /// Position within the filtered result list (the windowed index).
    pub rank: usize,
    /// Index into the original, unfiltered item collection.
    pub source_index: usize,
    pub item: &'a T,
    /// Start offset in the scroll axis.
    pub offset: u64,
    /// Size in the scroll axis.
    pub size: u32,
    pub detail: Option<&'a MatchDetail>,
}

/// A searchable, windowed list: items + query filter + debounce + windower.
///
/// This is the glue an adapter mounts per list view. Raw keystrokes go in via
/// [`SearchList::on_keystroke`]; a regular [`SearchList::tick`] advances the
/// debounce and re-filters when the quiet period elapses; scroll events and
/// post-render measurements flow through to the windowing engine.
///
/// Everything is single-threaded and synchronous. Each mounted list owns an
/// independent instance; nothing is shared across lists. Call
/// [`SearchList::cancel_pending`] before tearing a view down so a pending
/// debounce never fires against a dropped ledger.
pub struct SearchList<T> {
    items: Vec<T>,
    filter: QueryFilter<T>,
    query: DebouncedQuery,
    windower: Windower,
    filtered: Vec<MatchResult>,
}

impl<T> SearchList<T> {
    /// Mounts a list over a whole item collection.
    ///
    /// Starts with the empty-query fast path: every item visible, in original
    /// order.
    pub fn new(
        items: Vec<T>,
        filter: QueryFilter<T>,
        estimate_size: impl Fn(usize) -> u32 + Send + Sync + 'static,
        viewport: Viewport,
    ) -> Self {
        let filtered = filter.run(&items, "");
        let windower =
            Windower::new(WindowerOptions::new(filtered.len(), estimate_size).with_viewport(viewport));
        Self {
            items,
            filter,
            query: DebouncedQuery::default(),
            windower,
            filtered,
        }
    }

    /// Overrides the default 300 ms debounce quiet period.
    pub fn with_quiet_ms(mut self, quiet_ms: u64) -> Self {
        self.query = DebouncedQuery::new(quiet_ms);
        self
    }

    /// Number of items in the current filtered result.
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.filtered
    }

    /// Item behind result row `rank`.
    pub fn item(&self, rank: usize) -> Option<&T> {
        self.filtered.get(rank).and_then(|m| self.items.get(m.index))
    }

    pub fn query(&self) -> &DebouncedQuery {
        &self.query
    }

    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    pub fn windower_mut(&mut self) -> &mut Windower {
        &mut self.windower
    }

    /// Current ledger generation; see [`SearchList::measure_row_if_current`].
    pub fn generation(&self) -> u64 {
        self.windower.generation()
    }

    /// Records a keystroke, resetting the debounce deadline.
    pub fn on_keystroke(&mut self, text: &str, now_ms: u64) {
        self.query.set_raw(text, now_ms);
    }

    /// True while keystrokes are waiting on the quiet period: the host keeps
    /// the stale results visible and shows an indeterminate-loading indicator.
    pub fn is_filtering(&self) -> bool {
        self.query.is_pending()
    }

    /// Advances the debounce; re-filters when the quiet period has elapsed.
    ///
    /// Returns `true` when the filtered collection actually changed (the
    /// ledger was reset and all measurements dropped). A re-filter that yields
    /// the identical index sequence — typing and deleting back to an
    /// equivalent query — swaps in the fresh scores without touching the
    /// ledger, so the window and measurements survive.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(query) = self.query.poll(now_ms) else {
            return false;
        };
        let next = self.filter.run(&self.items, query);

        let identity_unchanged = next.len() == self.filtered.len()
            && next
                .iter()
                .zip(&self.filtered)
                .all(|(a, b)| a.index == b.index);
        self.filtered = next;

        if identity_unchanged {
            strace!(len = self.filtered.len(), "refilter: identity unchanged, no reset");
            return false;
        }

        sdebug!(len = self.filtered.len(), "refilter: resetting ledger");
        self.windower.reset_items(self.filtered.len());
        true
    }

    /// Replaces the whole item collection (e.g. a route change) and re-runs
    /// the active query against it.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.filtered = self.filter.run(&self.items, self.query.debounced());
        self.windower.reset_items(self.filtered.len());
    }

    /// Cancels any pending debounce deadline; call on teardown.
    pub fn cancel_pending(&mut self) {
        self.query.cancel();
    }

    pub fn on_scroll(&mut self, scroll_offset: u64) {
        self.windower.set_scroll_offset_clamped(scroll_offset);
    }

    pub fn set_visible_extent(&mut self, visible_extent: u32) {
        self.windower.set_visible_extent(visible_extent);
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.windower.set_overscan(overscan);
    }

    pub fn window(&mut self) -> Window {
        self.windower.window()
    }

    pub fn total_size(&mut self) -> u64 {
        self.windower.total_size()
    }

    /// Emits one [`Row`] per windowed result, without allocating.
    pub fn for_each_row(&mut self, mut f: impl FnMut(Row<'_, T>)) {
        let items = &self.items;
        let filtered = &self.filtered;
        self.windower.for_each_render_item(|ri| {
            let Some(m) = filtered.get(ri.index) else {
                return;
            };
            let Some(item) = items.get(m.index) else {
                return;
            };
            f(Row {
                rank: ri.index,
                source_index: m.index,
                item,
                offset: ri.offset,
                size: ri.size,
                detail: m.detail.as_ref(),
            });
        });
    }

    /// One render frame with measurement feedback; see
    /// `Windower::render_pass`. At most one corrective window recomputation
    /// runs per call.
    pub fn render_pass(&mut self, mut measure: impl FnMut(Row<'_, T>) -> Option<u32>) -> Window {
        let items = &self.items;
        let filtered = &self.filtered;
        self.windower.render_pass(|ri| {
            let m = filtered.get(ri.index)?;
            let item = items.get(m.index)?;
            measure(Row {
                rank: ri.index,
                source_index: m.index,
                item,
                offset: ri.offset,
                size: ri.size,
                detail: m.detail.as_ref(),
            })
        })
    }

    /// Feeds a post-render measurement for result row `rank` into the ledger.
    pub fn measure_row(&mut self, rank: usize, size: u32) -> bool {
        self.windower.measure(rank, size)
    }

    /// Like [`SearchList::measure_row`], but drops measurements captured
    /// against an older ledger generation (a callback that out-lived a filter
    /// reset).
    pub fn measure_row_if_current(&mut self, generation: u64, rank: usize, size: u32) -> bool {
        self.windower.measure_if_current(generation, rank, size)
    }
}

impl<T> core::fmt::Debug for SearchList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SearchList")
            .field("items", &self.items.len())
            .field("filtered", &self.filtered.len())
            .field("query", &self.query)
            .field("windower", &self.windower)
            .finish()
    }
}
