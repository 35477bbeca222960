//! Kubernetes probe endpoints that pass while warm and fail once cold.
//!
//! Kubernetes asks two questions; each service answers one of them.
//!
//! | Probe | Path | Warm (≤ 30 s) | Cold (> 30 s) | Kubernetes reaction |
//! |---|---|---|---|---|
//! | **Liveness** | `/health` | `200 OK` | `500 UNHEALTHY` | container restarted |
//! | **Readiness** | `/ready` | `200 READY` | `503 NOT READY` | pod pulled from endpoints, not restarted |
//!
//! A [`Probe`] is the const description; a [`ProbeEndpoint`] pairs it with
//! the service's [`ProcessClock`] and is what the route handler holds.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::{Phase, ProcessClock, WARM_WINDOW};
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The status and body a probe answers with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Verdict {
    pub status: Status,
    pub body: &'static str,
}

impl IntoResponse for Verdict {
    fn into_response(self) -> Response {
        Response::builder().status(self.status).text(self.body)
    }
}

/// One probe endpoint: where it lives and what it says in each phase.
#[derive(Clone, Copy, Debug)]
pub struct Probe {
    pub name: &'static str,
    pub path: &'static str,
    pub threshold: Duration,
    pub warm: Verdict,
    pub cold: Verdict,
}

impl Probe {
    /// Failing liveness tells the kubelet to restart the container.
    pub const LIVENESS: Probe = Probe {
        name: "liveness",
        path: "/health",
        threshold: WARM_WINDOW,
        warm: Verdict { status: Status::Ok, body: "OK" },
        cold: Verdict { status: Status::InternalServerError, body: "UNHEALTHY" },
    };

    /// Failing readiness removes the pod from Service endpoints; the
    /// container keeps running.
    pub const READINESS: Probe = Probe {
        name: "readiness",
        path: "/ready",
        threshold: WARM_WINDOW,
        warm: Verdict { status: Status::Ok, body: "READY" },
        cold: Verdict { status: Status::ServiceUnavailable, body: "NOT READY" },
    };

    /// Same probe with a different warm window.
    pub const fn with_threshold(self, threshold: Duration) -> Probe {
        Probe { threshold, ..self }
    }

    pub fn verdict(&self, phase: Phase) -> Verdict {
        match phase {
            Phase::Warm => self.warm,
            Phase::Cold => self.cold,
        }
    }
}

/// A probe bound to the clock of the service serving it.
///
/// Built once at startup and copied into the route handler; holds no
/// mutable state.
#[derive(Clone, Copy, Debug)]
pub struct ProbeEndpoint {
    pub probe: Probe,
    pub clock: ProcessClock,
}

impl ProbeEndpoint {
    pub fn new(probe: Probe, clock: ProcessClock) -> Self {
        Self { probe, clock }
    }

    /// The answer this probe gives at `now`.
    pub fn respond_at(&self, now: Instant) -> Verdict {
        let phase = self.clock.phase_at(now, self.probe.threshold);
        debug!(
            probe = self.probe.name,
            elapsed_ms = self.clock.elapsed_at(now).as_millis() as u64,
            ?phase,
            "probe evaluated"
        );
        self.probe.verdict(phase)
    }

    pub fn respond(&self) -> Verdict {
        self.respond_at(Instant::now())
    }
}
