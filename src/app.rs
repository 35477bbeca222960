//! Wiring for a probe service: routes, bind address, startup.

use tracing::info;

use crate::clock::ProcessClock;
use crate::error::Error;
use crate::probe::{Probe, ProbeEndpoint};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::server::Server;

/// Both services listen on every interface, port 5000.
pub const BIND_ADDR: &str = "0.0.0.0:5000";

/// `GET /`, the homepage for poking the service by hand.
pub async fn home(_req: Request) -> Response {
    Response::text("App is running")
}

/// Routes for one service: its probe path plus the homepage.
pub fn router(endpoint: ProbeEndpoint) -> Router {
    Router::new()
        .get(endpoint.probe.path, move |_req: Request| async move { endpoint.respond() })
        .get("/", home)
}

/// Starts a service for `probe` on [`BIND_ADDR`] and serves until killed.
///
/// The warm window starts here, before the port is bound.
pub async fn run(probe: Probe) -> Result<(), Error> {
    let endpoint = ProbeEndpoint::new(probe, ProcessClock::start());
    let server = Server::bind(BIND_ADDR).await?;

    info!(
        probe = probe.name,
        path = probe.path,
        window_s = probe.threshold.as_secs(),
        "probe service started"
    );

    server.serve(router(endpoint)).await
}
