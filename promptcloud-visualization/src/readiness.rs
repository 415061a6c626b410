//! Bounded polling for a late-loading plotting library

use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// States of the readiness poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Polling; `attempt` is the 1-based number of the next check
    Waiting { attempt: u32 },
    Ready,
    /// Gave up after `attempts` failed checks
    Exhausted { attempts: u32 },
}

impl Readiness {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Readiness::Waiting { .. })
    }
}

/// Checks availability on a fixed interval up to a bounded number of attempts
#[derive(Debug, Clone)]
pub struct ReadinessPoller {
    interval: Duration,
    max_attempts: u32,
    state: Readiness,
}

impl ReadinessPoller {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
            state: Readiness::Waiting { attempt: 1 },
        }
    }

    pub fn state(&self) -> Readiness {
        self.state
    }

    /// Advance the state machine with the outcome of one check
    pub fn step(&mut self, available: bool) -> Readiness {
        self.state = match self.state {
            Readiness::Waiting { .. } if available => Readiness::Ready,
            Readiness::Waiting { attempt } if attempt >= self.max_attempts => {
                Readiness::Exhausted { attempts: attempt }
            }
            Readiness::Waiting { attempt } => Readiness::Waiting { attempt: attempt + 1 },
            terminal => terminal,
        };
        self.state
    }

    /// Check immediately, then once per interval, until ready or exhausted
    ///
    /// The interval timer is dropped on return, so no check runs afterwards.
    pub async fn wait<F>(&mut self, mut check: F) -> Readiness
    where
        F: FnMut() -> bool,
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.state.is_terminal() {
            ticker.tick().await;
            let state = self.step(check());
            tracing::debug!(?state, "plot backend readiness check");
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    #[test]
    fn test_step_transitions() {
        let mut poller = ReadinessPoller::new(Duration::from_millis(500), 3);
        assert_eq!(poller.step(false), Readiness::Waiting { attempt: 2 });
        assert_eq!(poller.step(false), Readiness::Waiting { attempt: 3 });
        assert_eq!(poller.step(false), Readiness::Exhausted { attempts: 3 });
        // Terminal states absorb further checks
        assert_eq!(poller.step(true), Readiness::Exhausted { attempts: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_a_few_checks() {
        let checks = Cell::new(0);
        let mut poller = ReadinessPoller::new(Duration::from_millis(500), 10);
        let start = Instant::now();

        let state = poller
            .wait(|| {
                checks.set(checks.get() + 1);
                checks.get() == 3
            })
            .await;

        assert_eq!(state, Readiness::Ready);
        assert_eq!(checks.get(), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_and_stops_polling() {
        let checks = Cell::new(0);
        let mut poller = ReadinessPoller::new(Duration::from_millis(500), 4);

        let state = poller
            .wait(|| {
                checks.set(checks.get() + 1);
                false
            })
            .await;

        assert_eq!(state, Readiness::Exhausted { attempts: 4 });
        assert_eq!(checks.get(), 4);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(checks.get(), 4);
    }
}
