use alloc::sync::Arc;

use crate::Viewport;

/// Caller-supplied size estimator: a pure function of index only.
///
/// The estimate is used for any index that has not been measured yet. Values
/// are clamped to a minimum of 1 so offsets stay strictly increasing.
pub type EstimateSize = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// Configuration for [`crate::Windower`].
///
/// Cheap to clone: the estimator is stored in an `Arc` so adapters can tweak a
/// field and rebuild without reallocating closures.
pub struct WindowerOptions {
    /// Number of items in the (filtered) collection.
    pub count: usize,
    pub estimate_size: EstimateSize,
    /// Initial viewport geometry; updated later via the windower setters.
    pub viewport: Viewport,
}

impl WindowerOptions {
    /// Creates options for a list of `count` items.
    ///
    /// `estimate_size(i)` should return the estimated item size in the scroll
    /// axis (e.g. row height for vertical lists).
    pub fn new(count: usize, estimate_size: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self {
            count,
            estimate_size: Arc::new(estimate_size),
            viewport: Viewport::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.viewport.overscan = overscan;
        self
    }

    pub fn with_visible_extent(mut self, visible_extent: u32) -> Self {
        self.viewport.visible_extent = visible_extent;
        self
    }
}

impl Clone for WindowerOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            estimate_size: Arc::clone(&self.estimate_size),
            viewport: self.viewport,
        }
    }
}

impl core::fmt::Debug for WindowerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowerOptions")
            .field("count", &self.count)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}
