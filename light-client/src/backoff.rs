use std::{thread, time::Duration};

/// Pause schedule between retry attempts: starts at the configured delay and
/// doubles after every pause, up to `max_delay`. A zero start delay never
/// sleeps.
pub(crate) struct Backoff {
    delay: Duration,
    max_delay: Duration,
}

impl Backoff {
    pub(crate) fn new(start_delay: Duration, max_delay: Duration) -> Self {
        Self {
            delay: start_delay.min(max_delay),
            max_delay,
        }
    }

    pub(crate) fn next_delay(&mut self) -> Duration {
        let delay = self.delay;
        self.delay = self.delay.saturating_mul(2).min(self.max_delay);
        delay
    }

    pub(crate) fn wait(&mut self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}
