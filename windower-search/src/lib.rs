//! Debounced fuzzy query filtering for the `windower` crate.
//!
//! The `windower` crate is UI-agnostic and works purely on item counts and
//! sizes. This crate supplies the search side of a filterable, windowed list:
//!
//! - a fuzzy subsequence matcher with relevance scoring
//! - [`QueryFilter`]: collection + key set + query -> ordered candidate list
//! - [`DebouncedQuery`]: trailing-edge, cancel-and-replace debounce over an
//!   injected clock
//! - [`SearchList`]: the per-view controller wiring keystrokes, re-filtering,
//!   ledger resets, and windowed rendering together
//!
//! Filtering re-runs from scratch on every debounced query change, which is
//! fine for collections of a few hundred items; a much larger corpus would
//! want a prebuilt index behind the same [`QueryFilter`] contract.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod debounce;
mod filter;
mod fuzzy;
mod list;

#[cfg(test)]
mod tests;

pub use debounce::{DEFAULT_QUIET_MS, DebouncedQuery};
pub use filter::{FieldAccessor, MatchDetail, MatchResult, QueryFilter};
pub use fuzzy::{FuzzyMatch, fuzzy_match};
pub use list::{Row, SearchList};
