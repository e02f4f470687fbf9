use crate::*;

use alloc::vec;
use alloc::vec::Vec;

use windower::Viewport;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Surah {
    name_id: &'static str,
    translit: &'static str,
}

fn surahs() -> Vec<Surah> {
    vec![
        Surah {
            name_id: "Al-Fatihah",
            translit: "The Opener",
        },
        Surah {
            name_id: "Al-Baqarah",
            translit: "The Cow",
        },
        Surah {
            name_id: "Ali 'Imran",
            translit: "Family of Imran",
        },
        Surah {
            name_id: "Yasin",
            translit: "Ya Sin",
        },
        Surah {
            name_id: "An-Nas",
            translit: "Mankind",
        },
    ]
}

fn surah_filter() -> QueryFilter<Surah> {
    QueryFilter::new(["name_id", "translit"], |s: &Surah, key| match key {
        "name_id" => Some(s.name_id),
        "translit" => Some(s.translit),
        _ => None,
    })
}

// --- fuzzy matching ---

#[test]
fn fuzzy_match_basic() {
    let m = fuzzy_match("abc", "abcdef").unwrap();
    assert_eq!(m.positions, vec![0, 1, 2]);
    assert!(m.score > 0);
}

#[test]
fn fuzzy_match_non_consecutive() {
    let m = fuzzy_match("adf", "abcdef").unwrap();
    assert_eq!(m.positions, vec![0, 3, 5]);
}

#[test]
fn fuzzy_match_case_insensitive() {
    assert!(fuzzy_match("ABC", "abcdef").is_some());
    assert!(fuzzy_match("abc", "ABCDEF").is_some());
}

#[test]
fn fuzzy_match_requires_all_query_chars() {
    assert!(fuzzy_match("xyz", "abcdef").is_none());
    assert!(fuzzy_match("abcd", "abc").is_none());
}

#[test]
fn fuzzy_match_empty_query_is_none() {
    assert!(fuzzy_match("", "abcdef").is_none());
}

#[test]
fn fuzzy_match_prefers_word_boundaries() {
    let at_start = fuzzy_match("cat", "category").unwrap();
    let embedded = fuzzy_match("cat", "concatenate").unwrap();
    assert!(at_start.score > embedded.score);
}

#[test]
fn fuzzy_match_rewards_consecutive_runs() {
    let run = fuzzy_match("ab", "xab").unwrap();
    let gapped = fuzzy_match("ab", "xaxxb").unwrap();
    assert!(run.score > gapped.score);
}

// --- query filter ---

#[test]
fn empty_query_returns_all_in_original_order() {
    let items = surahs();
    let filter = surah_filter();
    let out = filter.run(&items, "");
    assert_eq!(out.len(), items.len());
    for (i, m) in out.iter().enumerate() {
        assert_eq!(m.index, i);
        assert!(m.detail.is_none());
    }
}

#[test]
fn whitespace_query_takes_the_fast_path() {
    let items = surahs();
    let out = surah_filter().run(&items, "   \t ");
    assert_eq!(out.len(), items.len());
    assert!(out.iter().all(|m| m.detail.is_none()));
}

#[test]
fn unique_name_yields_single_result() {
    let items = surahs();
    let out = surah_filter().run(&items, "An-Nas");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].index, 4);
    let detail = out[0].detail.as_ref().unwrap();
    assert_eq!(detail.key_index, 0);
    assert!(detail.score > 0);
}

#[test]
fn missing_field_is_a_non_match_not_an_error() {
    // Accessor that only knows one of the declared keys.
    let filter: QueryFilter<Surah> = QueryFilter::new(["name_id", "absent"], |s: &Surah, key| {
        (key == "name_id").then_some(s.name_id)
    });
    let items = surahs();
    let out = filter.run(&items, "Yasin");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].index, 3);
}

#[test]
fn results_sort_by_score_with_stable_ties() {
    let items = vec!["xab", "ab", "ab"];
    let filter: QueryFilter<&str> = QueryFilter::new(["text"], |s: &&str, _| Some(*s));
    let out = filter.run(&items, "ab");
    // Exact word-start matches outrank the embedded one; equal scores keep
    // original index order.
    assert_eq!(
        out.iter().map(|m| m.index).collect::<Vec<_>>(),
        vec![1, 2, 0]
    );
    let s1 = out[0].detail.as_ref().unwrap().score;
    let s2 = out[1].detail.as_ref().unwrap().score;
    assert_eq!(s1, s2);
}

#[test]
fn best_key_wins_per_item() {
    let items = vec![Surah {
        name_id: "Yasin",
        translit: "Ya Sin",
    }];
    let out = surah_filter().run(&items, "ya sin");
    assert_eq!(out.len(), 1);
    // "Ya Sin" matches the query contiguously, beating "Yasin" (no space).
    assert_eq!(out[0].detail.as_ref().unwrap().key_index, 1);
}

// --- debounce ---

#[test]
fn debounce_fires_once_after_the_quiet_period() {
    let mut q = DebouncedQuery::new(300);
    q.set_raw("a", 0);
    q.set_raw("ab", 50);
    q.set_raw("abc", 100);
    q.set_raw("abcd", 300);

    // Earlier deadlines were replaced; nothing fires before 600.
    assert_eq!(q.poll(299), None);
    assert_eq!(q.poll(400), None);
    assert_eq!(q.poll(599), None);
    assert!(q.is_pending());

    assert_eq!(q.poll(600), Some("abcd"));
    assert!(!q.is_pending());
    assert_eq!(q.poll(601), None);
    assert_eq!(q.debounced(), "abcd");
}

#[test]
fn debounce_typing_back_to_same_text_fires_nothing() {
    let mut q = DebouncedQuery::default();
    q.set_raw("nas", 0);
    assert_eq!(q.poll(300), Some("nas"));

    q.set_raw("na", 400);
    q.set_raw("nas", 450);
    // Deadline passes, but the value round-tripped: no downstream re-filter.
    assert_eq!(q.poll(750), None);
    assert!(!q.is_pending());
    assert_eq!(q.debounced(), "nas");
}

#[test]
fn debounce_cancel_discards_the_pending_deadline() {
    let mut q = DebouncedQuery::default();
    q.set_raw("abc", 0);
    q.cancel();
    assert!(!q.is_pending());
    assert_eq!(q.poll(10_000), None);
    assert_eq!(q.debounced(), "");
    assert_eq!(q.raw(), "abc");
}

// --- search list controller ---

fn mounted_list() -> SearchList<Surah> {
    SearchList::new(
        surahs(),
        surah_filter(),
        |_| 40,
        Viewport::new(0, 200, 1),
    )
}

#[test]
fn mounts_with_every_item_visible() {
    let mut list = mounted_list();
    assert_eq!(list.len(), 5);
    assert!(!list.is_filtering());

    let mut rows = Vec::new();
    list.for_each_row(|row| rows.push((row.rank, row.source_index, row.item.clone())));
    assert_eq!(rows.len(), 5);
    for (i, (rank, source, item)) in rows.iter().enumerate() {
        assert_eq!(*rank, i);
        assert_eq!(*source, i);
        assert_eq!(item, &surahs()[i]);
    }
}

#[test]
fn refilter_resets_the_ledger() {
    let mut list = mounted_list();
    assert!(list.measure_row(0, 90));
    let generation = list.generation();

    list.on_keystroke("An-Nas", 0);
    assert!(list.is_filtering());
    assert!(!list.tick(100)); // quiet period not over
    assert!(list.tick(300));
    assert!(!list.is_filtering());

    assert_eq!(list.len(), 1);
    assert_ne!(list.generation(), generation);
    assert!(!list.windower().ledger().is_measured(0));

    let mut rows = Vec::new();
    list.for_each_row(|row| rows.push((row.source_index, row.detail.cloned())));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, 4);
    assert!(rows[0].1.is_some());
}

#[test]
fn stale_measurement_after_refilter_is_dropped() {
    let mut list = mounted_list();
    let generation = list.generation();

    list.on_keystroke("An-Nas", 0);
    list.tick(300);

    // A measurement callback scheduled before the re-filter lands late.
    assert!(!list.measure_row_if_current(generation, 0, 120));
    assert!(!list.windower().ledger().is_measured(0));
    assert!(list.measure_row_if_current(list.generation(), 0, 120));
}

#[test]
fn identical_result_identity_skips_the_reset() {
    let mut list = mounted_list();

    list.on_keystroke("An-Nas", 0);
    assert!(list.tick(300));
    let generation = list.generation();
    assert!(list.measure_row(0, 64));

    // A different query with the same single result: fresh scores, no reset.
    list.on_keystroke("Nas", 1000);
    assert!(!list.tick(1300));
    assert_eq!(list.len(), 1);
    assert_eq!(list.generation(), generation);
    assert!(list.windower().ledger().is_measured(0));
    assert_eq!(list.query().debounced(), "Nas");
}

#[test]
fn round_trip_query_never_refilters() {
    let mut list = mounted_list();
    list.on_keystroke("An-Nas", 0);
    assert!(list.tick(300));
    let generation = list.generation();

    // Type, then delete back to the applied query before the deadline fires.
    list.on_keystroke("An-Na", 400);
    list.on_keystroke("An-Nas", 450);
    assert!(!list.tick(750));
    assert_eq!(list.generation(), generation);
}

#[test]
fn cancel_pending_prevents_a_late_fire() {
    let mut list = mounted_list();
    list.on_keystroke("An-Nas", 0);
    list.cancel_pending();
    assert!(!list.is_filtering());
    assert!(!list.tick(10_000));
    assert_eq!(list.len(), 5);
}

#[test]
fn render_pass_applies_row_measurements() {
    let mut list = mounted_list();
    let win = list.render_pass(|row| Some(row.size * 2));
    // 5 rows at 80 after correction; extent 200 still needs rows 0..=2 plus
    // overscan.
    assert_eq!(win.total_size, 5 * 80);
    assert_eq!(win.start_index, 0);
    assert_eq!(win.end_index, 3);
    assert_eq!(list.windower().ledger().measured_count(), 5);
}

#[test]
fn set_items_reapplies_the_active_query() {
    let mut list = mounted_list();
    list.on_keystroke("An-Nas", 0);
    list.tick(300);
    assert_eq!(list.len(), 1);

    let mut next = surahs();
    next.push(Surah {
        name_id: "An-Nasr",
        translit: "The Divine Support",
    });
    list.set_items(next);
    // Both An-Nas and An-Nasr match the active query now.
    assert_eq!(list.len(), 2);
    let indices: Vec<usize> = list.results().iter().map(|m| m.index).collect();
    assert!(indices.contains(&4));
    assert!(indices.contains(&5));
}

#[test]
fn scrolling_is_clamped_to_the_filtered_extent() {
    let mut list = mounted_list();
    list.on_scroll(1_000_000);
    // 5 items * 40 = 200 total, extent 200 -> max scroll 0.
    assert_eq!(list.windower().viewport().scroll_offset, 0);
}
