/// Live geometry of a scroll container, supplied by the presentation layer.
///
/// The engine never reads the UI directly; adapters feed readings of this type
/// in as plain values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Current scroll offset in the scroll axis.
    pub scroll_offset: u64,
    /// Visible extent of the container in the scroll axis.
    pub visible_extent: u32,
    /// Extra items rendered beyond each viewport edge to mask pop-in during
    /// fast scrolling.
    pub overscan: usize,
}

impl Viewport {
    pub fn new(scroll_offset: u64, visible_extent: u32, overscan: usize) -> Self {
        Self {
            scroll_offset,
            visible_extent,
            overscan,
        }
    }
}

/// The contiguous index range that must be rendered, plus the total scrollable
/// extent.
///
/// `start_index` and `end_index` are inclusive and clamped to
/// `[0, count - 1]`. The window for an empty list is `{0, 0, 0}`; use
/// [`Window::is_empty`] to detect it. `total_size` lets the caller size the
/// scrollable container so native scrollbar proportions stay correct even
/// though only the window is actually rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize,
    pub total_size: u64,
}

impl Window {
    pub const EMPTY: Window = Window {
        start_index: 0,
        end_index: 0,
        total_size: 0,
    };

    /// True iff the underlying list was empty when this window was computed.
    ///
    /// Per-item sizes are clamped to at least 1, so `total_size == 0` can only
    /// happen for an empty list.
    pub fn is_empty(&self) -> bool {
        self.total_size == 0
    }

    /// Number of items covered by the window.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end_index - self.start_index + 1
        }
    }
}

/// One render instruction: place item `index` at `offset` with `size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderItem {
    pub index: usize,
    /// Start offset in the scroll axis.
    pub offset: u64,
    /// Size in the scroll axis (measured if available, estimated otherwise).
    pub size: u32,
}

impl RenderItem {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}
