//! Thin request/response value objects.
//!
//! The router never touches a socket: whatever frontend accepted the
//! connection builds a [`Request`] from the already-read pieces and hands it
//! to [`Router::run`](crate::Router::run) together with a [`Response`] that
//! middleware and handlers write into.

mod request;
mod response;

pub use request::{parse_query_params, BodyError, Request};
pub use response::{status_reason, Response};
