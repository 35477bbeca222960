//! Liveness probe demo: `/health` passes for 30 s, then fails until restart.
//!
//! Run with:
//!   cargo run --bin liveness
//!
//! Try:
//!   curl -i http://localhost:5000/health
//!   curl http://localhost:5000/

use kube_probes::{app, probe::Probe};

#[tokio::main]
async fn main() -> Result<(), kube_probes::Error> {
    tracing_subscriber::fmt::init();

    app::run(Probe::LIVENESS).await
}
