//! Trailing-edge debounce for a changing value.
//!
//! `Debouncer` is a wall-clock-based state machine. It does not use
//! internal threads or timers -- the caller is responsible for calling
//! `poll()` periodically with the current time, the same contract as the
//! session monitor. Each `update` re-arms the pending window, superseding
//! any value still waiting; a pending value commits only once the stream
//! has been quiet for one full delay window. `cancel` is total: nothing
//! from the cancelled cycle can commit afterwards.

use chrono::{DateTime, Utc};

/// Observable debouncer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No update waiting.
    Idle,
    /// An update is waiting for its delay window to elapse.
    Pending,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    armed_at: DateTime<Utc>,
}

/// Holds a source value and exposes it with a fixed lag.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    committed: Option<T>,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            committed: None,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn state(&self) -> DebounceState {
        if self.pending.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }

    /// Last committed value.
    pub fn value(&self) -> Option<&T> {
        self.committed.as_ref()
    }

    /// Observe a new source value. Re-arms the window, superseding any
    /// value still pending.
    pub fn update(&mut self, value: T, now: DateTime<Utc>) {
        self.pending = Some(Pending {
            value,
            armed_at: now,
        });
    }

    /// Commit the pending value if its window has elapsed. Returns the
    /// newly committed value on the committing call only; later calls
    /// return `None` until the next update (read the standing value with
    /// [`Debouncer::value`]).
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<&T> {
        let elapsed_ms = match &self.pending {
            Some(p) => (now - p.armed_at).num_milliseconds(),
            None => return None,
        };
        if elapsed_ms < self.delay_ms as i64 {
            return None;
        }
        let pending = self.pending.take()?;
        self.committed = Some(pending.value);
        self.committed.as_ref()
    }

    /// Drop any pending value without committing. The disposal path:
    /// after cancellation nothing from that cycle can commit.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn at(base: DateTime<Utc>, offset_ms: i64) -> DateTime<Utc> {
        base + Duration::milliseconds(offset_ms)
    }

    #[test]
    fn single_update_commits_exactly_once() {
        let base = Utc::now();
        let mut d = Debouncer::new(500);

        d.update("a", base);
        assert_eq!(d.state(), DebounceState::Pending);

        assert_eq!(d.poll(at(base, 499)), None);
        assert_eq!(d.poll(at(base, 500)), Some(&"a"));
        assert_eq!(d.state(), DebounceState::Idle);

        // No second transition from the same cycle.
        assert_eq!(d.poll(at(base, 1_000)), None);
        assert_eq!(d.value(), Some(&"a"));
    }

    #[test]
    fn rapid_updates_commit_only_the_last_value() {
        let base = Utc::now();
        let mut d = Debouncer::new(500);

        d.update(1, at(base, 0));
        d.update(2, at(base, 200));
        assert_eq!(d.poll(at(base, 450)), None);
        d.update(3, at(base, 450));

        // 500ms after the first update, but the window was re-armed.
        assert_eq!(d.poll(at(base, 500)), None);
        assert_eq!(d.poll(at(base, 949)), None);
        assert_eq!(d.poll(at(base, 950)), Some(&3));
        assert_eq!(d.value(), Some(&3));
    }

    #[test]
    fn cancel_prevents_commit_from_pending_cycle() {
        let base = Utc::now();
        let mut d = Debouncer::new(500);

        d.update("doomed", base);
        d.cancel();
        assert_eq!(d.state(), DebounceState::Idle);
        assert_eq!(d.poll(at(base, 10_000)), None);
        assert_eq!(d.value(), None);
    }

    #[test]
    fn update_after_cancel_starts_a_fresh_cycle() {
        let base = Utc::now();
        let mut d = Debouncer::new(500);

        d.update(1, base);
        d.cancel();
        d.update(2, at(base, 100));
        assert_eq!(d.poll(at(base, 599)), None);
        assert_eq!(d.poll(at(base, 600)), Some(&2));
    }

    proptest! {
        /// Any burst of updates spaced closer than the delay commits only
        /// the last value, and only after the stream goes quiet.
        #[test]
        fn burst_commits_last_value_only(
            values in prop::collection::vec(0u32..1000, 1..20),
            gaps in prop::collection::vec(0i64..499, 1..20),
        ) {
            let base = Utc::now();
            let mut d = Debouncer::new(500);
            let mut t = 0i64;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    t += gaps.get(i - 1).copied().unwrap_or(0);
                }
                d.update(*value, at(base, t));
                // Nothing commits while updates keep arriving.
                prop_assert_eq!(d.poll(at(base, t)), None);
            }
            // Still inside the window of the final update.
            prop_assert_eq!(d.poll(at(base, t + 499)), None);
            let last = *values.last().unwrap();
            prop_assert_eq!(d.poll(at(base, t + 500)), Some(&last));
        }
    }
}
