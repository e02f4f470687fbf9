//! A headless list-windowing engine.
//!
//! Given a large ordered collection and a scrollable viewport, this crate
//! computes the minimal contiguous window of items that must be rendered,
//! measures and caches item sizes (estimated first, corrected by real
//! measurements later), and keeps offsets and totals consistent as the
//! collection changes.
//!
//! It is UI-agnostic. A presentation layer is expected to provide:
//! - viewport geometry (`scroll_offset` / `visible_extent` / `overscan`)
//! - a size estimator, plus post-render measurements
//! - the item count of whatever (possibly filtered) collection it displays
//!
//! For fuzzy query filtering and debounced search state on top of this
//! engine, see the `windower-search` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod ledger;
mod options;
mod types;
mod window;


pub use ledger::{LedgerPhase, MIN_ITEM_SIZE, SizeEntry, SizeLedger};
pub use options::{EstimateSize, WindowerOptions};
pub use types::{RenderItem, Viewport, Window};
pub use window::{Windower, compute_window};
