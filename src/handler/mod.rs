//! Handler shapes, signatures, and argument resolution.
//!
//! A [`Handler`] pairs an invocation target with an explicit parameter
//! signature declared at registration. The target is a tagged variant:
//! either a direct closure or a [`Controller`] value bound to a named
//! action — a bound handler whose controller does not expose the action
//! fails at construction, not at dispatch.
//!
//! At dispatch, [`resolve_args`] turns the captured path parameters and the
//! signature into an ordered argument list: a matched path parameter wins
//! (always the raw matched text, never coerced), then a declared service
//! rule, then a declared default, then the empty placeholder.

mod core;
mod resolve;

pub use core::{
    ArgValue, Controller, Handler, HandlerError, HandlerFn, HandlerKind, ParamSpec, ServiceFactory,
};
pub use resolve::resolve_args;
