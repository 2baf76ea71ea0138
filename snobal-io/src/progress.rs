/*
MIT License
Copyright (c) Snobal contributors
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Progress reporting during model runs.
use clock::Clock;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

const BAR_LENGTH: usize = 50;

/// A `\r`-redrawn progress bar, ticked once per data interval consumed
/// from a [`crate::ForcingSource`]. Unlike a plain percent-done
/// counter, every redraw also carries the simulated clock reached so
/// far, since wall-clock fraction and simulated time diverge the
/// moment a run's data intervals aren't all the same length.
pub struct ProgressBar {
    title: String,
    last_progress: AtomicUsize,
    counter: AtomicUsize,
    total_count: usize,
    start: Instant,
}

impl ProgressBar {
    /// Starts a bar for a run of `total_count` data intervals,
    /// beginning at `Clock::START`.
    pub fn new(title: String, total_count: usize) -> Self {
        let bar = Self {
            title,
            total_count,
            last_progress: AtomicUsize::new(0),
            counter: AtomicUsize::new(0),
            start: Instant::now(),
        };
        bar.show_progress(0, Clock::START);
        bar
    }

    /// Records one more data interval consumed, now at simulated time
    /// `sim_time`. Ticking past `total_count` data intervals means the
    /// driver's own estimate of the run length was wrong (the forcing
    /// series ran longer than `total_count` implied); that's surfaced
    /// as a warning rather than silently clamped, the same way the
    /// driver reports any other runtime warning.
    pub fn tic(&self, sim_time: Clock) {
        let c = self.counter.fetch_add(1, Ordering::Relaxed);
        let progress = if c >= self.total_count {
            eprintln!(
                "warning: progress bar '{}' ticked past its {} expected data intervals (now at {sim_time})",
                self.title, self.total_count
            );
            100
        } else {
            (100. * (c as f64) / self.total_count as f64).round() as usize
        };

        let lp = self.last_progress.load(Ordering::Relaxed);
        let delta = if progress > lp { progress - lp } else { 0 };
        if delta >= 100 / BAR_LENGTH {
            self.last_progress.fetch_add(delta, Ordering::Relaxed);
            self.show_progress(progress, sim_time);
        }
    }

    fn show_progress(&self, progress: usize, sim_time: Clock) {
        let filled_length = (BAR_LENGTH as f64 * (progress as f64 / 100.0)).round() as usize;
        let filled = "=".repeat(filled_length);
        let n_empty = BAR_LENGTH.saturating_sub(filled_length);
        let empty = " ".repeat(n_empty);
        print!(
            "\r    {} [{}{}] {:.2}% ({sim_time})",
            self.title, filled, empty, progress
        );
        let _ = std::io::stdout().flush();
    }

    /// Finishes the bar at simulated time `end`, printing the elapsed
    /// wall time alongside how far the simulated clock actually got.
    pub fn done(&self, end: Clock) {
        println!(
            "\nDone after {} seconds, simulated through {end}",
            self.start.elapsed().as_secs()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tic_never_exceeds_a_hundred_percent() {
        let bar = ProgressBar::new("test".to_string(), 4);
        for i in 0..10 {
            bar.tic(Clock::from_hours(i as clock::Float));
        }
        assert!(bar.last_progress.load(Ordering::Relaxed) <= 100);
    }

    #[test]
    fn ticking_past_total_count_still_reports_progress() {
        let bar = ProgressBar::new("test".to_string(), 2);
        bar.tic(Clock::from_hours(1.0 as clock::Float));
        bar.tic(Clock::from_hours(2.0 as clock::Float));
        bar.tic(Clock::from_hours(3.0 as clock::Float));
        assert_eq!(bar.counter.load(Ordering::Relaxed), 3);
    }
}
