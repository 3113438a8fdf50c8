use crate::http::{Request, Response};

/// A pre-handler check that can veto request processing.
///
/// A route's middleware run in list order before argument resolution.
/// Returning `false` stops the dispatch immediately — no further
/// middleware, no resolution, no handler — and the request counts as
/// handled, with the middleware expected to have written whatever response
/// the client should see. Middleware observe the live inbound request and
/// write to the live response the handler later sees.
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &Request, res: &mut Response) -> bool;
}
