//! Radix-tree request router.
//!
//! One tree per HTTP method. A path that is registered, but not for the
//! requested method, answers `405` with an `allow` header; `HEAD` falls back
//! to the `GET` handler and `OPTIONS` lists what a path accepts. Anything
//! else is a bare `404`.

use std::collections::HashMap;
use std::sync::Arc;

use http::{HeaderMap, Method};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

/// Result of matching a method + path against the routing table.
pub(crate) enum Route {
    Matched(BoxedHandler, HashMap<String, String>),
    Options(String),
    MethodNotAllowed(String),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_insert_with(MatchitRouter::new)
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Shorthand for `on(Method::GET, path, handler)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Route {
        if let Some((handler, params)) = self.find(method, path) {
            return Route::Matched(handler, params);
        }
        if *method == Method::HEAD {
            if let Some((handler, params)) = self.find(&Method::GET, path) {
                return Route::Matched(handler, params);
            }
        }

        let allowed = self.allowed(path);
        if allowed.is_empty() {
            return Route::NotFound;
        }
        let allow = allowed.join(", ");
        if *method == Method::OPTIONS {
            Route::Options(allow)
        } else {
            Route::MethodNotAllowed(allow)
        }
    }

    /// Routes one request to a response. Never fails: unmatched requests
    /// become `404`/`405` responses.
    pub(crate) async fn handle(&self, method: Method, path: String, headers: HeaderMap) -> Response {
        match self.lookup(&method, &path) {
            Route::Matched(handler, params) => {
                handler.call(Request::new(method, path, headers, params)).await
            }
            Route::Options(allow) => Response::builder()
                .header("allow", &allow)
                .no_body(),
            Route::MethodNotAllowed(allow) => Response::builder()
                .status(Status::MethodNotAllowed)
                .header("allow", &allow)
                .no_body(),
            Route::NotFound => Response::status(Status::NotFound),
        }
    }

    fn find(&self, method: &Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Methods accepted at `path`, sorted, with the implicit `HEAD` and
    /// `OPTIONS` included. Empty when nothing is registered there.
    fn allowed(&self, path: &str) -> Vec<String> {
        let mut allowed: Vec<String> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| method.as_str().to_owned())
            .collect();
        if allowed.is_empty() {
            return allowed;
        }
        let has = |allowed: &[String], m: &Method| allowed.iter().any(|a| a == m.as_str());
        if has(&allowed, &Method::GET) && !has(&allowed, &Method::HEAD) {
            allowed.push(Method::HEAD.as_str().to_owned());
        }
        if !has(&allowed, &Method::OPTIONS) {
            allowed.push(Method::OPTIONS.as_str().to_owned());
        }
        allowed.sort();
        allowed
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
