// Example: minimal windowing over a large list.
use windower::{Viewport, Windower, WindowerOptions};

fn main() {
    let mut w = Windower::new(
        WindowerOptions::new(1_000_000, |_| 24).with_viewport(Viewport::new(123_456, 600, 4)),
    );

    let win = w.window();
    println!("total_size={}", win.total_size);
    println!("window={:?}", win);

    let mut items = Vec::new();
    w.collect_render_items(&mut items);
    println!("first_rendered={:?}", items.first());
    println!("rendered_count={}", items.len());
}
