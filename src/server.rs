//! HTTP server.
//!
//! One tokio task per connection; HTTP/1.1 or HTTP/2, whichever the client
//! speaks. There is no shutdown path: a probe demo runs until the kubelet
//! kills its container.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{debug, error, info};

use crate::error::Error;
use crate::router::Router;

/// A bound HTTP server, ready to [`serve`](Server::serve).
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds the listening socket. Fails if the address is unusable or taken.
    ///
    /// ```rust,no_run
    /// # async fn demo() -> Result<(), kube_probes::Error> {
    /// use kube_probes::Server;
    /// let server = Server::bind("0.0.0.0:5000").await?;
    /// # Ok(()) }
    /// ```
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// The address actually bound; useful after binding port `0`.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections and dispatches them through `router`. Runs until
    /// the task is dropped; accept and connection errors are logged and
    /// skipped.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let router = Arc::new(router);

        info!(addr = %self.local_addr()?, "listening");

        loop {
            let (stream, remote_addr) = match self.listener.accept().await {
                Ok(v) => v,
                Err(e) => {
                    error!("accept error: {e}");
                    continue;
                }
            };

            let router = Arc::clone(&router);
            let io = TokioIo::new(stream);

            tokio::spawn(async move {
                // Called once per request on the connection.
                let svc = service_fn(move |req| {
                    let router = Arc::clone(&router);
                    async move { dispatch(router, req).await }
                });

                if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                    .serve_connection(io, svc)
                    .await
                {
                    error!(peer = %remote_addr, "connection error: {e}");
                }
            });
        }
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Infallible towards hyper: routing misses become 404/405 and a response
/// that cannot be encoded becomes an empty 500.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let method = parts.method;
    let path = parts.uri.path().to_owned();

    let response = router.handle(method.clone(), path.clone(), parts.headers).await;

    let inner = match response.into_inner() {
        Ok(inner) => inner,
        Err(e) => {
            error!(%method, %path, "unencodable response: {e}");
            let mut fallback = http::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        }
    };

    debug!(
        %method,
        %path,
        status = inner.status().as_u16(),
        latency_us = started.elapsed().as_micros() as u64,
        "request"
    );
    Ok(inner)
}
