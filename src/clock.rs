//! Process clock and the warm/cold phase check shared by both probes.
//!
//! Each service captures one [`ProcessClock`] when it starts and never resets
//! it. Every probe request asks the same question: has more than the warm
//! window elapsed since then? [`elapsed_state`] answers it as a pure function
//! of two instants, so the answer for any moment can be tested without
//! waiting for the clock.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use kube_probes::clock::{elapsed_state, Phase, WARM_WINDOW};
//!
//! let t0 = Instant::now();
//! assert_eq!(elapsed_state(t0, t0 + Duration::from_secs(1), WARM_WINDOW), Phase::Warm);
//! assert_eq!(elapsed_state(t0, t0 + Duration::from_secs(31), WARM_WINDOW), Phase::Cold);
//! ```

use std::time::{Duration, Instant};

/// How long a freshly started service reports itself healthy.
pub const WARM_WINDOW: Duration = Duration::from_secs(30);

/// Where a service is in its one-way lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Elapsed time is at most the threshold.
    Warm,
    /// Elapsed time is past the threshold. Terminal.
    Cold,
}

/// Classifies `now` relative to `start`.
///
/// `Cold` only when strictly more than `threshold` has elapsed; exactly on the
/// threshold is still `Warm`. An instant before `start` counts as zero elapsed.
pub fn elapsed_state(start: Instant, now: Instant, threshold: Duration) -> Phase {
    if now.saturating_duration_since(start) > threshold {
        Phase::Cold
    } else {
        Phase::Warm
    }
}

/// The instant a service started. Copied into every handler, never mutated.
///
/// Backed by [`Instant`], which is monotonic: adjusting the system clock can
/// neither revive a cold service nor age a warm one.
#[derive(Clone, Copy, Debug)]
pub struct ProcessClock {
    started: Instant,
}

impl ProcessClock {
    /// Captures the current instant as the service start.
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started: Instant) -> Self {
        Self { started }
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    pub fn phase_at(&self, now: Instant, threshold: Duration) -> Phase {
        elapsed_state(self.started, now, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn warm_up_to_and_including_the_threshold() {
        let t0 = Instant::now();
        assert_eq!(elapsed_state(t0, t0, WARM_WINDOW), Phase::Warm);
        assert_eq!(elapsed_state(t0, t0 + secs(29.0), WARM_WINDOW), Phase::Warm);
        assert_eq!(elapsed_state(t0, t0 + WARM_WINDOW, WARM_WINDOW), Phase::Warm);
    }

    #[test]
    fn cold_just_past_the_threshold() {
        let t0 = Instant::now();
        let just_past = t0 + WARM_WINDOW + Duration::from_nanos(1);
        assert_eq!(elapsed_state(t0, just_past, WARM_WINDOW), Phase::Cold);
        assert_eq!(elapsed_state(t0, t0 + secs(30.5), WARM_WINDOW), Phase::Cold);
    }

    #[test]
    fn instant_before_start_is_warm() {
        let t0 = Instant::now();
        let later = t0 + secs(5.0);
        assert_eq!(elapsed_state(later, t0, WARM_WINDOW), Phase::Warm);
    }

    #[test]
    fn once_cold_never_warm_again() {
        let clock = ProcessClock::start();
        let t0 = clock.started();
        let mut seen_cold = false;
        for tenth in 0..=600 {
            let now = t0 + Duration::from_millis(tenth * 100);
            match clock.phase_at(now, WARM_WINDOW) {
                Phase::Cold => seen_cold = true,
                Phase::Warm => assert!(!seen_cold, "warm again at {now:?}"),
            }
        }
        assert!(seen_cold);
    }

    #[test]
    fn elapsed_saturates() {
        let clock = ProcessClock::start();
        let t0 = clock.started();
        assert_eq!(clock.elapsed_at(t0 + secs(2.0)), secs(2.0));
        let earlier = ProcessClock::started_at(t0 + secs(1.0));
        assert_eq!(earlier.elapsed_at(t0), Duration::ZERO);
    }
}
