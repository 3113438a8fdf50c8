use tracing::info;

use super::Middleware;
use crate::http::{Request, Response};

/// Logs every request it sees; never vetoes.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn handle(&self, req: &Request, _res: &mut Response) -> bool {
        info!(method = %req.method(), uri = %req.uri(), "request admitted");
        true
    }
}
