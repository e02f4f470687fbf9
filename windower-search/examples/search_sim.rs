// Example: simulated typing into a searchable, windowed list.
use windower::Viewport;
use windower_search::{QueryFilter, SearchList};

struct Entry {
    name: String,
    translation: String,
}

fn main() {
    let items: Vec<Entry> = (1..=114)
        .map(|n| Entry {
            name: format!("Surah {n}"),
            translation: format!("Chapter {n}"),
        })
        .chain(std::iter::once(Entry {
            name: "An-Nas".into(),
            translation: "Mankind".into(),
        }))
        .collect();

    let filter = QueryFilter::new(["name", "translation"], |e: &Entry, key| match key {
        "name" => Some(e.name.as_str()),
        "translation" => Some(e.translation.as_str()),
        _ => None,
    });

    let mut list = SearchList::new(items, filter, |_| 48, Viewport::new(0, 480, 3));
    println!("mounted: {} rows, window={:?}", list.len(), list.window());

    // Simulated keystrokes; the debounce only fires 300ms after the last one.
    let mut now = 0;
    for text in ["a", "an", "an-", "an-n"] {
        list.on_keystroke(text, now);
        now += 80;
        list.tick(now);
        println!("t={now}ms raw={:?} filtering={}", text, list.is_filtering());
    }

    now += 300;
    if list.tick(now) {
        println!(
            "t={now}ms refiltered: {} rows for {:?}",
            list.len(),
            list.query().debounced()
        );
    }

    list.for_each_row(|row| {
        println!(
            "  rank={} source={} offset={} size={} name={}",
            row.rank, row.source_index, row.offset, row.size, row.item.name
        );
    });
}
