use serde::Serialize;
use serde_json::Value;

/// Reason phrases for the status codes this crate emits itself.
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// One outbound HTTP response, written into by middleware and handlers.
///
/// Starts as an empty 200. The setters chain, and `set_header` replaces an
/// existing header of the same name (case-insensitive) rather than
/// duplicating it.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    status: u16,
    #[serde(skip_serializing)]
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::new()
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    pub fn reason(&self) -> &'static str {
        status_reason(self.status)
    }

    /// Add or replace a header (name compare is case-insensitive).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn set_body(&mut self, body: Value) -> &mut Self {
        self.body = Some(body);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.body = Some(Value::String(text.into()));
        self
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Point the client at `location`: status 302 plus a `Location` header.
    pub fn redirect(&mut self, location: &str) -> &mut Self {
        self.set_status(302);
        self.set_header("Location", location)
    }

    /// Serialized body bytes: string bodies go out verbatim, everything
    /// else as JSON.
    pub fn body_bytes(&self) -> Vec<u8> {
        match &self.body {
            None => Vec::new(),
            Some(Value::String(s)) => s.clone().into_bytes(),
            Some(other) => serde_json::to_vec(other).unwrap_or_default(),
        }
    }

    /// Back to a fresh 200 with no headers or body.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
