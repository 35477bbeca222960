//! # kube-probes
//!
//! Two tiny HTTP services for watching Kubernetes probes do their job.
//!
//! Each service answers its probe successfully for the first 30 seconds
//! after it starts, then fails it for good:
//!
//! - `liveness` serves `/health`: `200 OK`, then `500 UNHEALTHY`. The kubelet
//!   restarts the container, which starts the clock again.
//! - `readiness` serves `/ready`: `200 READY`, then `503 NOT READY`. The pod is
//!   taken out of its Service endpoints but keeps running.
//!
//! Both also serve `/` with `App is running`, and both listen on
//! `0.0.0.0:5000`. Nothing is configurable.
//!
//! ## Library layout
//!
//! - [`clock`]: the start instant and the warm/cold check.
//! - [`probe`]: what each probe answers in each phase.
//! - [`app`]: routes and startup.
//! - [`Router`], [`Server`], [`Response`]: the small HTTP layer underneath,
//!   on hyper and a `matchit` radix tree.
//!
//! ```rust,no_run
//! use kube_probes::{app, probe::Probe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kube_probes::Error> {
//!     app::run(Probe::READINESS).await
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod clock;
pub mod probe;

pub use error::Error;
pub use handler::Handler;
pub use http::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
