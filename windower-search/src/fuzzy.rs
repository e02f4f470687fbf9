use alloc::vec::Vec;

/// Bonus for a match directly following the previous matched char.
const CONSECUTIVE_BONUS: i32 = 10;
/// Bonus for a match at the start of a word.
const WORD_BOUNDARY_BONUS: i32 = 5;
/// Gap penalties are capped at this many skipped chars.
const MAX_GAP_PENALTY: usize = 10;

/// Score and matched char positions for one query/target pair.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyMatch {
    pub score: i32,
    /// Char indices into the target that matched, in order.
    pub positions: Vec<usize>,
}

/// Case-insensitive subsequence match of `query` against `target`.
///
/// Every query char must appear in the target in order. Scoring rewards
/// consecutive runs and word-boundary hits, and penalizes gaps. Returns `None`
/// when the query is empty (callers handle the empty-query fast path
/// themselves) or when not all query chars match.
pub fn fuzzy_match(query: &str, target: &str) -> Option<FuzzyMatch> {
    if query.is_empty() {
        return None;
    }

    let query_lower: Vec<char> = query.to_lowercase().chars().collect();
    let target_lower: Vec<char> = target.to_lowercase().chars().collect();

    let mut positions = Vec::with_capacity(query_lower.len());
    let mut score: i32 = 0;
    let mut query_idx = 0;
    let mut prev_match_pos: Option<usize> = None;

    for (i, c) in target_lower.iter().enumerate() {
        if query_idx < query_lower.len() && *c == query_lower[query_idx] {
            positions.push(i);

            if let Some(prev) = prev_match_pos {
                if i == prev + 1 {
                    score += CONSECUTIVE_BONUS;
                } else {
                    score -= (i - prev - 1).min(MAX_GAP_PENALTY) as i32;
                }
            }

            if i == 0
                || target_lower
                    .get(i.saturating_sub(1))
                    .is_none_or(|c| !c.is_alphanumeric())
            {
                score += WORD_BOUNDARY_BONUS;
            }

            score += 1;
            prev_match_pos = Some(i);
            query_idx += 1;
        }
    }

    if query_idx == query_lower.len() {
        Some(FuzzyMatch { score, positions })
    } else {
        None
    }
}
