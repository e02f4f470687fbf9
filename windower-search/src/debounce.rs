use alloc::string::String;
use alloc::string::ToString;

/// Default quiet period between the last keystroke and the filter re-running.
pub const DEFAULT_QUIET_MS: u64 = 300;

/// Trailing-edge debounce for a text query.
///
/// Time is injected as explicit `now_ms` readings: no timers, no global clock.
/// The host drives it with [`DebouncedQuery::set_raw`] on every keystroke and
/// [`DebouncedQuery::poll`] on its regular tick, the same way the windowing
/// engine is driven by explicit viewport readings.
///
/// The pending deadline is single-shot and cancel-and-replace: each keystroke
/// discards the previous one. While a deadline is pending
/// ([`DebouncedQuery::is_pending`]), the previously filtered results stay
/// visible and the host may show an indeterminate-loading indicator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebouncedQuery {
    raw: String,
    debounced: String,
    quiet_ms: u64,
    deadline_ms: Option<u64>,
}

impl DebouncedQuery {
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            raw: String::new(),
            debounced: String::new(),
            quiet_ms,
            deadline_ms: None,
        }
    }

    /// The text as typed, ahead of the debounce.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The last value that fired; the only value that triggers re-filtering.
    pub fn debounced(&self) -> &str {
        &self.debounced
    }

    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// True while a deadline is pending (keystrokes seen, filter not re-run).
    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Records a keystroke, resetting the quiet-period deadline.
    pub fn set_raw(&mut self, text: &str, now_ms: u64) {
        if text == self.raw {
            return;
        }
        self.raw = text.to_string();
        self.deadline_ms = Some(now_ms.saturating_add(self.quiet_ms));
    }

    /// Fires the pending deadline once it has passed.
    ///
    /// Returns the new debounced value exactly once per deadline, and only if
    /// it actually differs from the current one — typing and deleting back to
    /// the same text fires nothing, so no redundant re-filter runs downstream.
    pub fn poll(&mut self, now_ms: u64) -> Option<&str> {
        let deadline = self.deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        self.deadline_ms = None;
        if self.raw == self.debounced {
            return None;
        }
        self.debounced = self.raw.clone();
        Some(&self.debounced)
    }

    /// Cancels any pending deadline without applying it.
    ///
    /// Call this when the owning view is torn down so nothing fires against a
    /// ledger that no longer exists.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }
}

impl Default for DebouncedQuery {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_MS)
    }
}
