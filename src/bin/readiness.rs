//! Readiness probe demo: `/ready` passes for 30 s, then reports not ready.
//!
//! Run with:
//!   cargo run --bin readiness
//!
//! Try:
//!   curl -i http://localhost:5000/ready
//!   curl http://localhost:5000/

use kube_probes::{app, probe::Probe};

#[tokio::main]
async fn main() -> Result<(), kube_probes::Error> {
    tracing_subscriber::fmt::init();

    app::run(Probe::READINESS).await
}
