//! Random contiguous window selection.

use rand::{
    Rng,
    distr::{Distribution, Uniform},
};
use tracing::debug;

use crate::models::{table::PriceTable, window::Window};

/// Copy a uniformly chosen [`WINDOW_LEN`](crate::WINDOW_LEN)-row window out of
/// `table`.
///
/// The start offset is drawn from the closed range `[0, len - WINDOW_LEN]`, so
/// every valid window, including the last one, is equally likely. Pass a seeded
/// [`StdRng`](rand::rngs::StdRng) for reproducible runs.
pub fn sample<R: Rng + ?Sized>(table: &PriceTable, rng: &mut R) -> Window {
    let max_start = table.max_start();
    let start = draw_start(max_start, rng);
    debug!(start, max_start, "sampled window");

    match table.window_at(start) {
        Some(window) => window,
        None => unreachable!("start {start} is past max_start {max_start}"),
    }
}

/// Draw an offset from `[0, max_start]` without modulo bias.
fn draw_start<R: Rng + ?Sized>(max_start: usize, rng: &mut R) -> usize {
    match Uniform::new_inclusive(0, max_start) {
        Ok(dist) => dist.sample(rng),
        Err(err) => unreachable!("0..={max_start} is never an empty range: {err}"),
    }
}
