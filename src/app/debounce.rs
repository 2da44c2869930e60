//! Cancel-and-restart timer for search input.
//!
//! The debouncer holds at most one pending value. Scheduling a new value replaces the pending
//! one and pushes the deadline out; nothing is queued. The owner drives it by sleeping until
//! [`Debouncer::deadline`] and then calling [`Debouncer::take_due`].

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiescence window at `now`.
    ///
    /// Returns true when a previously pending value was superseded.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        self.pending
            .replace(Pending {
                value,
                deadline: now + self.window,
            })
            .is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its window has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_once_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        assert!(!debouncer.schedule("a", start));
        assert_eq!(debouncer.take_due(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.take_due(start + WINDOW), Some("a"));
        assert_eq!(debouncer.take_due(start + Duration::from_secs(5)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_new_value_supersedes_and_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.schedule("a", start);
        assert!(debouncer.schedule("ab", start + Duration::from_millis(50)));
        assert!(debouncer.schedule("abc", start + Duration::from_millis(100)));

        // 300ms after the first keystroke is not enough any more.
        assert_eq!(debouncer.take_due(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(400))
        );
        assert_eq!(
            debouncer.take_due(start + Duration::from_millis(400)),
            Some("abc")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_drives_with_tokio_timer() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("x", Instant::now());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("xy", Instant::now());

        let deadline = debouncer.deadline().unwrap();
        tokio::time::sleep_until(deadline).await;
        assert_eq!(debouncer.take_due(Instant::now()), Some("xy"));
    }
}
