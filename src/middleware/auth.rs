use super::Middleware;
use crate::http::{Request, Response};

/// Vetoes requests whose `authorization` header does not carry the
/// configured token.
pub struct BearerAuthMiddleware {
    token: String,
}

impl BearerAuthMiddleware {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Middleware for BearerAuthMiddleware {
    fn handle(&self, req: &Request, res: &mut Response) -> bool {
        match req.header("authorization") {
            Some(value) if value == self.token => true,
            _ => {
                res.set_status(401)
                    .set_body(serde_json::json!({ "error": "Unauthorized" }));
                false
            }
        }
    }
}
