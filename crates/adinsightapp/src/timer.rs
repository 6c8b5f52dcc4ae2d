//! Session stopwatch.
//!
//! Independent of the data model: the only link is that the formatted elapsed time is
//! what testers put in an entry's duration field. Time is injected as [`Instant`]s so
//! callers (and tests) control the clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Starts or resumes. No-op when already running.
    pub fn start(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    /// Pauses if running, otherwise starts.
    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.pause(now);
        } else {
            self.start(now);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.accumulated + running
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }
}

/// `HH:MM:SS`, with hours growing past two digits when needed.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
