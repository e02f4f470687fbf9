use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::fuzzy::{FuzzyMatch, fuzzy_match};

/// Extracts the text behind a named search key from an item.
///
/// Returning `None` (the item has no such field) makes the item a non-match
/// for that key; it is never an error.
pub type FieldAccessor<T> = Arc<dyn for<'a> Fn(&'a T, &str) -> Option<&'a str> + Send + Sync>;

/// Match metadata for one result row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchDetail {
    /// Index into the filter's key list of the best-scoring key.
    pub key_index: usize,
    pub score: i32,
    /// Matched char positions within that key's text.
    pub positions: Vec<usize>,
}

/// One result row: the original item's index plus optional match metadata.
///
/// `detail` is `None` only on the empty-query fast path, where every item is
/// returned unscored in original order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    /// Index into the original item collection.
    pub index: usize,
    pub detail: Option<MatchDetail>,
}

/// Filters an item collection by a fuzzy text query over a fixed key set.
///
/// Items stay opaque: the filter only sees whatever text the accessor exposes
/// for each key. Cheap to clone (keys + `Arc`'d accessor).
pub struct QueryFilter<T> {
    keys: Vec<String>,
    field: FieldAccessor<T>,
}

impl<T> QueryFilter<T> {
    pub fn new(
        keys: impl IntoIterator<Item = impl Into<String>>,
        field: impl for<'a> Fn(&'a T, &str) -> Option<&'a str> + Send + Sync + 'static,
    ) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            field: Arc::new(field),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Produces the reduced, ordered candidate list for `query`.
    ///
    /// An empty or whitespace-only query returns every item in original order
    /// with no match metadata — a deliberate fast path that skips scoring
    /// entirely. Otherwise each item is scored across all keys (best key
    /// wins), and results are sorted by descending score; ties keep ascending
    /// original index (the sort is stable).
    pub fn run(&self, items: &[T], query: &str) -> Vec<MatchResult> {
        let query = query.trim();
        if query.is_empty() {
            return (0..items.len())
                .map(|index| MatchResult {
                    index,
                    detail: None,
                })
                .collect();
        }

        let mut out = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let mut best: Option<MatchDetail> = None;
            for (key_index, key) in self.keys.iter().enumerate() {
                let Some(text) = (self.field)(item, key) else {
                    continue;
                };
                let Some(FuzzyMatch { score, positions }) = fuzzy_match(query, text) else {
                    continue;
                };
                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(MatchDetail {
                        key_index,
                        score,
                        positions,
                    });
                }
            }
            if let Some(detail) = best {
                out.push(MatchResult {
                    index,
                    detail: Some(detail),
                });
            }
        }

        out.sort_by(|a, b| {
            let sa = a.detail.as_ref().map(|d| d.score).unwrap_or(0);
            let sb = b.detail.as_ref().map(|d| d.score).unwrap_or(0);
            sb.cmp(&sa)
        });
        out
    }
}

impl<T> Clone for QueryFilter<T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            field: Arc::clone(&self.field),
        }
    }
}

impl<T> core::fmt::Debug for QueryFilter<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QueryFilter")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
