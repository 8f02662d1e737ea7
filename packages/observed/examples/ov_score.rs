//! Wiring presentation code to game state with `ObservedValue`:
//!
//! * Binding an observer that paints the current value immediately.
//! * Change detection suppressing redundant notifications.
//! * Update helpers for read-modify-write patterns.

use observed::ObservedValue;

fn main() {
    let score = ObservedValue::new(0_i64);

    // The "display" binds to the score: it paints once immediately and then repaints on
    // every change.
    score.bind(|value| println!("score display: {value}"));

    // Game logic hands out points without knowing who is watching.
    score.add(100);
    score.add(250);

    // No change, no repaint.
    score.set(350);

    // A penalty, clamped so the score never goes negative.
    score.subtract(500);
    score.clamp_to(0, i64::MAX);

    println!("final score: {}", score.get());
}
