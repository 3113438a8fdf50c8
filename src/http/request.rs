use http::Method;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Failure reading a request body as JSON.
///
/// A missing body and a malformed body are distinct cases so callers can
/// tell "nothing was sent" apart from "something unparseable was sent".
#[derive(Debug)]
pub enum BodyError {
    /// No body was sent with the request.
    Empty,
    /// A body was present but is not valid JSON.
    Json(serde_json::Error),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::Empty => write!(f, "request has no body"),
            BodyError::Json(err) => write!(f, "request body is not valid JSON: {err}"),
        }
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BodyError::Empty => None,
            BodyError::Json(err) => Some(err),
        }
    }
}

/// Parse query string parameters from a request uri.
///
/// Extracts everything after the `?` (fragment excluded) and decodes
/// parameter names and values.
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    match uri.split_once('?') {
        Some((_, rest)) => {
            let query = rest.split('#').next().unwrap_or("");
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }
        None => HashMap::new(),
    }
}

/// One inbound HTTP request, as observed by the router.
///
/// Header names are lowercased on insertion so lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: String,
    headers: HashMap<String, String>,
    body: Option<String>,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Request path with query string and fragment stripped.
    pub fn path(&self) -> &str {
        self.uri.split(['?', '#']).next().unwrap_or("/")
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Decoded query string parameters.
    pub fn query_params(&self) -> HashMap<String, String> {
        parse_query_params(&self.uri)
    }

    pub fn query(&self, name: &str) -> Option<String> {
        let mut params = self.query_params();
        params.remove(name)
    }

    /// Parse the body as JSON.
    ///
    /// Returns [`BodyError::Empty`] when no body was sent and
    /// [`BodyError::Json`] when a body was sent but does not parse.
    pub fn json_body(&self) -> Result<serde_json::Value, BodyError> {
        let text = self
            .body
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or(BodyError::Empty)?;
        serde_json::from_str(text).map_err(|err| {
            debug!(error = %err, "request body failed JSON parse");
            BodyError::Json(err)
        })
    }

    pub fn is_content_type(&self, content_type: &str) -> bool {
        self.header("content-type") == Some(content_type)
    }

    pub fn is_json(&self) -> bool {
        self.is_content_type("application/json")
    }

    pub fn is_form_data(&self) -> bool {
        self.is_content_type("multipart/form-data")
    }
}
