//! Scoped wall-clock timer for test runs.

use std::time::{Duration, Instant};

/// Prints the time elapsed since [`ElapsedTimer::start`] when dropped.
///
/// Hold it across the blocking engine run; the report is printed on every
/// path out of the scope, interrupts and spawn failures included.
#[derive(Debug)]
#[must_use = "the elapsed time is reported when the timer is dropped"]
pub struct ElapsedTimer {
    started: Instant,
}

impl ElapsedTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// The line printed on drop, e.g. `[Time elapsed: 00:01:02.345]`.
    pub fn report(&self) -> String {
        format!("[Time elapsed: {}]", format_elapsed(self.elapsed()))
    }
}

impl Drop for ElapsedTimer {
    fn drop(&mut self) {
        println!("{}", self.report());
    }
}

/// Format a duration as `HH:MM:SS.mmm`, rounded to the millisecond.
///
/// Hours keep counting past 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = (elapsed.as_micros() + 500) / 1000;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{ms:03}")
}
