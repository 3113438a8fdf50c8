mod auth;
mod core;
mod tracing;

pub use auth::BearerAuthMiddleware;
pub use core::Middleware;
pub use tracing::TracingMiddleware;
