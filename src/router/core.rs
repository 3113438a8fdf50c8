use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use http::Method;
use tracing::{debug, info, warn};

use super::pattern::{ParamVec, PatternError, RoutePattern};
use crate::handler::{resolve_args, Handler};
use crate::http::{Request, Response};
use crate::ids::RequestId;
use crate::middleware::Middleware;

/// HTTP methods the router accepts registrations for.
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// One registered (method, pattern, handler, middleware) tuple.
pub struct Route {
    pub method: Method,
    pub pattern: RoutePattern,
    pub handler: Handler,
    pub middleware: Vec<Arc<dyn Middleware>>,
}

/// Registration-driven router.
///
/// Routes are appended through the verb methods, optionally inside
/// [`group`](Router::group)/[`version`](Router::version) blocks, and
/// matched by a linear scan in registration order — the first structural
/// match wins. Registration mutates the router; dispatch only reads it, so
/// an instance shared across threads after setup needs no synchronization.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
    error_handlers: HashMap<String, Handler>,
    group_prefix: String,
    group_middleware: Vec<Arc<dyn Middleware>>,
    default_version: String,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default version tag used by [`version`](Router::version)
    /// blocks that name neither a prefix nor a tag. Startup configuration;
    /// dispatch only reads it.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.default_version = version.into();
    }

    pub fn get(
        &mut self,
        path: &str,
        handler: Handler,
        middleware: &[Arc<dyn Middleware>],
    ) -> Result<(), PatternError> {
        self.add_route(Method::GET, path, handler, middleware)
    }

    pub fn post(
        &mut self,
        path: &str,
        handler: Handler,
        middleware: &[Arc<dyn Middleware>],
    ) -> Result<(), PatternError> {
        self.add_route(Method::POST, path, handler, middleware)
    }

    pub fn put(
        &mut self,
        path: &str,
        handler: Handler,
        middleware: &[Arc<dyn Middleware>],
    ) -> Result<(), PatternError> {
        self.add_route(Method::PUT, path, handler, middleware)
    }

    pub fn patch(
        &mut self,
        path: &str,
        handler: Handler,
        middleware: &[Arc<dyn Middleware>],
    ) -> Result<(), PatternError> {
        self.add_route(Method::PATCH, path, handler, middleware)
    }

    pub fn delete(
        &mut self,
        path: &str,
        handler: Handler,
        middleware: &[Arc<dyn Middleware>],
    ) -> Result<(), PatternError> {
        self.add_route(Method::DELETE, path, handler, middleware)
    }

    pub fn options(
        &mut self,
        path: &str,
        handler: Handler,
        middleware: &[Arc<dyn Middleware>],
    ) -> Result<(), PatternError> {
        self.add_route(Method::OPTIONS, path, handler, middleware)
    }

    /// Register a GET route that answers with a redirect to `target`.
    ///
    /// An ordinary route whose handler writes 302 plus a `Location` header
    /// and returns — not a special route kind.
    pub fn redirect(&mut self, path: &str, target: &str) -> Result<(), PatternError> {
        let target = target.to_string();
        let handler = Handler::from_fn(move |_args, _req, res| {
            res.redirect(&target);
            Ok(())
        });
        self.add_route(Method::GET, path, handler, &[])
    }

    /// Append one route under the current group context.
    ///
    /// The stored pattern is compiled here from the fully-prefixed path;
    /// dispatch never resolves prefixes. The route's effective middleware is
    /// the group middleware followed by `middleware`, preserving order.
    pub fn add_route(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
        middleware: &[Arc<dyn Middleware>],
    ) -> Result<(), PatternError> {
        if !SUPPORTED_METHODS.contains(&method) {
            warn!(method = %method, path = %path, "unsupported method, route not registered");
            return Ok(());
        }
        let full_path = format!("{}{}", self.group_prefix, path);
        let pattern = RoutePattern::compile(&full_path)?;
        let mut chain = self.group_middleware.clone();
        chain.extend(middleware.iter().map(Arc::clone));
        debug!(
            method = %method,
            path = %full_path,
            middleware_count = chain.len(),
            "route registered"
        );
        self.routes.push(Route {
            method,
            pattern,
            handler,
            middleware: chain,
        });
        Ok(())
    }

    /// Run `body` with `prefix` appended to the current group prefix and
    /// `middleware` appended to the current group middleware.
    ///
    /// The prior context is restored on every exit path, including a body
    /// that returns an error, so sibling registrations are unaffected.
    /// Nesting composes: registering `/c` inside `group("/a")` inside
    /// `group("/b")` is indistinguishable from `group("/b/a")`.
    pub fn group<F>(
        &mut self,
        prefix: &str,
        middleware: &[Arc<dyn Middleware>],
        body: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let next_prefix = format!("{}{}", self.group_prefix, prefix);
        let saved_prefix = std::mem::replace(&mut self.group_prefix, next_prefix);
        let saved_middleware = self.group_middleware.clone();
        self.group_middleware.extend(middleware.iter().map(Arc::clone));

        let outcome = body(self);

        self.group_prefix = saved_prefix;
        self.group_middleware = saved_middleware;
        outcome
    }

    /// Like [`group`](Router::group), but the effective prefix *replaces*
    /// the current one instead of appending to it.
    ///
    /// Exactly one source determines the prefix, in precedence order: a
    /// non-empty explicit `prefix`, then `/api/v{tag}` from a non-empty
    /// explicit `tag`, then `/api/v{default}` from the router's default
    /// version tag.
    pub fn version<F>(
        &mut self,
        prefix: Option<&str>,
        tag: Option<&str>,
        middleware: &[Arc<dyn Middleware>],
        body: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let effective = match prefix.filter(|p| !p.is_empty()) {
            Some(p) => p.to_string(),
            None => match tag.filter(|t| !t.is_empty()) {
                Some(t) => format!("/api/v{t}"),
                None => format!("/api/v{}", self.default_version),
            },
        };
        let saved_prefix = std::mem::replace(&mut self.group_prefix, effective);
        let saved_middleware = self.group_middleware.clone();
        self.group_middleware.extend(middleware.iter().map(Arc::clone));

        let outcome = body(self);

        self.group_prefix = saved_prefix;
        self.group_middleware = saved_middleware;
        outcome
    }

    /// Bulk-register error-key → handler pairs, overwriting existing keys.
    ///
    /// Only the `"404"` key is consulted by dispatch; other keys are stored
    /// for manual lookup or future wiring, never triggered automatically.
    pub fn errors(&mut self, entries: Vec<(&str, Handler)>) {
        for (key, handler) in entries {
            self.error_handlers.insert(key.to_string(), handler);
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Human-readable summary of the routing table.
    ///
    /// Plain text with a fixed layout; not meant for machine parsing.
    pub fn info(&self, show_routes: bool, show_error_handlers: bool) -> String {
        const COUNTED: [Method; 7] = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ];
        let version = if self.default_version.is_empty() {
            "N/A"
        } else {
            &self.default_version
        };

        let mut out = String::new();
        let _ = writeln!(out, "Routes count: {}", self.routes.len());
        let _ = writeln!(
            out,
            "Has 404 handler: {}",
            self.error_handlers.contains_key("404")
        );
        let _ = writeln!(out, "Current app version: {version}");
        let counts = COUNTED
            .iter()
            .map(|m| {
                let n = self.routes.iter().filter(|r| &r.method == m).count();
                format!("{m}={n}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "Counted methods: {counts}");
        if show_routes {
            let _ = writeln!(out, "Routes:");
            for route in &self.routes {
                let _ = writeln!(
                    out,
                    "  {} {} -> {}",
                    route.method,
                    route.pattern.raw(),
                    route.handler.describe()
                );
            }
        }
        if show_error_handlers {
            let _ = writeln!(out, "Error handlers:");
            let mut keys: Vec<_> = self.error_handlers.keys().collect();
            keys.sort();
            for key in keys {
                let _ = writeln!(out, "  {} -> {}", key, self.error_handlers[key].describe());
            }
        }
        out
    }

    /// Dispatch one request using its own uri and method.
    /// See [`run_with`](Router::run_with).
    pub fn run(&self, req: &Request, res: &mut Response) -> Result<()> {
        self.run_with(None, None, req, res)
    }

    /// Dispatch one request; explicit `uri`/`method` override the request's
    /// own values when given.
    ///
    /// Scans the table in registration order and selects the first route
    /// whose method equals the request method and whose path structurally
    /// matches. On selection the route's middleware chain runs first; any
    /// veto ends the dispatch with the request considered handled.
    /// Otherwise arguments are resolved against the captured path
    /// parameters and the handler is invoked — a handler error propagates
    /// to the caller unwrapped, and no further route is tried either way.
    ///
    /// With no match, the response status is set to 404 and the registered
    /// `"404"` handler (if any) runs once, else a literal not-found body is
    /// written. An unmatched request is the expected fallback path, not an
    /// error.
    pub fn run_with(
        &self,
        uri: Option<&str>,
        method: Option<Method>,
        req: &Request,
        res: &mut Response,
    ) -> Result<()> {
        let raw_uri = uri.unwrap_or_else(|| req.uri());
        let path = raw_uri.split(['?', '#']).next().unwrap_or("/");
        let method = method.unwrap_or_else(|| req.method().clone());
        let request_id = RequestId::from_header_or_new(req.header("x-request-id"));

        debug!(request_id = %request_id, method = %method, path = %path, "route match attempt");

        for route in &self.routes {
            if route.method != method {
                continue;
            }
            let Some(params) = route.pattern.capture(path) else {
                continue;
            };
            info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                route = %route.pattern.raw(),
                path_params = ?params,
                "route matched"
            );

            for (idx, mw) in route.middleware.iter().enumerate() {
                if !mw.handle(req, res) {
                    debug!(
                        request_id = %request_id,
                        middleware_idx = idx,
                        "middleware stopped request"
                    );
                    return Ok(());
                }
            }

            let args = resolve_args(&params, route.handler.params());
            route.handler.invoke(&args, req, res)?;
            return Ok(());
        }

        warn!(request_id = %request_id, method = %method, path = %path, "no route matched");
        res.set_status(404);
        match self.error_handlers.get("404") {
            Some(handler) => {
                let args = resolve_args(&ParamVec::new(), handler.params());
                handler.invoke(&args, req, res)?;
            }
            None => {
                res.set_text("404 - Page Not Found!");
            }
        }
        Ok(())
    }
}
