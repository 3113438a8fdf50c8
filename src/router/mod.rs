//! # Router Module
//!
//! Route registration, path matching, and dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Appending routes through the verb methods, with `group`/`version`
//!   blocks contributing path prefixes and middleware
//! - Matching an inbound request path against the registered patterns
//! - Extracting named path parameters from matched routes
//! - Running the matched route's middleware chain and handler, or the
//!   not-found fallback
//!
//! ## Architecture
//!
//! Registration and matching are two phases:
//!
//! 1. **Compilation**: when a route is appended, the current group prefix is
//!    concatenated onto its path and the result is compiled into literal and
//!    placeholder segments (`{name}` / `{name:regex}`, the regex anchored).
//!    A bad constraint fails the registration call.
//!
//! 2. **Matching**: each dispatch walks the table in registration order and
//!    tests the request path segment-by-segment against each compiled
//!    pattern until one matches. First match wins; there is no specificity
//!    ranking and no index structure.

mod core;
mod pattern;

pub use core::{Route, Router, SUPPORTED_METHODS};
pub use pattern::{ParamVec, PatternError, RoutePattern, MAX_INLINE_PARAMS};
