//! # Crossway
//!
//! **Crossway** is a registration-driven HTTP router: application setup code
//! registers path/method combinations against handlers (optionally inside
//! `group`/`version` blocks that contribute prefixes and middleware), and a
//! single `run` call per inbound request matches the path, executes the
//! route's middleware chain, resolves handler arguments from captured path
//! parameters, and invokes the handler — falling back to a registered `"404"`
//! handler when nothing matches.
//!
//! ## Architecture
//!
//! - **[`router`]** — route table, group/version registration context, path
//!   pattern compilation and matching, and the dispatch loop
//! - **[`handler`]** — handler shapes (direct closures and controller-bound
//!   actions), explicit parameter signatures, and argument resolution
//! - **[`middleware`]** — the pre-handler veto capability plus a couple of
//!   stock implementations
//! - **[`http`]** — thin request/response value objects; the router performs
//!   no transport I/O
//!
//! ## Dispatch model
//!
//! Routes are compiled at registration: group prefixes are concatenated into
//! the stored pattern up front and placeholder segments (`{name}` or
//! `{name:regex}`) become anchored matchers, so a malformed constraint fails
//! the registration call rather than a later request. Dispatch is a linear
//! scan in registration order — the first route with an equal method and a
//! structural path match wins, with no specificity ranking and no index.
//! Registration order is dispatch order.
//!
//! ## Quick start
//!
//! ```
//! # fn main() -> anyhow::Result<()> {
//! use crossway::{Handler, ParamSpec, Request, Response, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get(
//!     "/pets/{id:\\d+}",
//!     Handler::from_fn(|args, _req, res| {
//!         let id = args[0].as_str().unwrap_or_default();
//!         res.set_body(serde_json::json!({ "pet": id }));
//!         Ok(())
//!     })
//!     .with_params(vec![ParamSpec::path("id")]),
//!     &[],
//! )?;
//!
//! let req = Request::new(Method::GET, "/pets/42?fields=name");
//! let mut res = Response::new();
//! router.run(&req, &mut res)?;
//! assert_eq!(res.status(), 200);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Registration mutates the router (`&mut self`); dispatch only reads
//! (`&self`). A router shared across worker threads after registration
//! completes needs no synchronization — handlers and middleware are held in
//! `Arc`s, and the per-dispatch parameter map is local to one `run` call.
//! Nothing in a dispatch suspends or retries: a handler either returns or
//! its error propagates out of `run`.

pub mod handler;
pub mod http;
pub mod ids;
pub mod middleware;
pub mod router;

pub use crate::handler::{resolve_args, ArgValue, Controller, Handler, HandlerError, ParamSpec};
pub use crate::http::{BodyError, Request, Response};
pub use crate::ids::RequestId;
pub use crate::middleware::Middleware;
pub use crate::router::{ParamVec, PatternError, RoutePattern, Router};
