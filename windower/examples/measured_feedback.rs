// Example: estimate-then-measure feedback loop.
use windower::{Viewport, Windower, WindowerOptions};

fn main() {
    // Rows estimated at 40, but every third row actually renders at 90.
    let mut w = Windower::new(
        WindowerOptions::new(500, |_| 40).with_viewport(Viewport::new(1_000, 400, 2)),
    );

    println!("estimated window={:?} phase={:?}", w.window(), w.phase());

    // One frame: render the window, feed real sizes back, recompute at most
    // once if anything was corrected.
    let win = w.render_pass(|it| {
        let actual = if it.index % 3 == 0 { 90 } else { 40 };
        Some(actual)
    });
    println!("corrected window={:?} phase={:?}", win, w.phase());
    println!("total_size={}", w.total_size());

    // A collection change drops all measurements.
    w.reset_items(500);
    println!("after reset: phase={:?} total={}", w.phase(), w.total_size());
}
