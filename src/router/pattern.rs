use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

/// Maximum number of path parameters before heap allocation.
/// Most routes bind few params; 8 keeps the common case on the stack.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch hot path.
///
/// Param names are `Arc<str>` because they come from the compiled route
/// table (known at registration) and clone in O(1); values are per-request
/// strings captured from the URL. Lookup is last-write-wins for duplicate
/// names.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Placeholder syntax for one whole path segment: `{name}` or `{name:regex}`.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{(\w+)(?::(.+))?\}$").expect("placeholder regex is valid"));

/// A path pattern failed to compile at registration time.
#[derive(Debug)]
pub struct PatternError {
    pub segment: String,
    pub source: regex::Error,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid constraint in path segment '{}': {}",
            self.segment, self.source
        )
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param {
        name: Arc<str>,
        /// Anchored constraint; `None` matches any segment text.
        pattern: Option<Regex>,
    },
}

/// The registration-time compiled form of a route path.
///
/// Prefixes are already applied when a pattern is compiled, so matching
/// never resolves group context.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a path pattern, resolving placeholder segments up front so a
    /// bad embedded regex surfaces at registration rather than at dispatch.
    pub fn compile(path: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        for part in split_segments(path) {
            match PLACEHOLDER_RE.captures(part) {
                Some(caps) => {
                    let name: Arc<str> = Arc::from(&caps[1]);
                    let pattern = match caps.get(2) {
                        Some(constraint) => Some(
                            Regex::new(&format!("^{}$", constraint.as_str())).map_err(
                                |source| PatternError {
                                    segment: part.to_string(),
                                    source,
                                },
                            )?,
                        ),
                        None => None,
                    };
                    segments.push(Segment::Param { name, pattern });
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }
        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The pattern string as registered, prefixes included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Match a concrete request path, extracting named parameters.
    ///
    /// Segment counts must be equal — no wildcards, no optional segments.
    /// Literal segments compare byte-exact; placeholder segments test their
    /// anchored constraint (if any) and bind the raw segment text.
    /// Case-sensitive, no percent-decoding.
    pub fn capture(&self, request_path: &str) -> Option<ParamVec> {
        let given = split_segments(request_path);
        if given.len() != self.segments.len() {
            return None;
        }
        let mut params = ParamVec::new();
        for (segment, text) in self.segments.iter().zip(given) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != text {
                        return None;
                    }
                }
                Segment::Param { name, pattern } => {
                    if let Some(re) = pattern {
                        if !re.is_match(text) {
                            return None;
                        }
                    }
                    params.push((Arc::clone(name), text.to_string()));
                }
            }
        }
        Some(params)
    }
}

/// Split on `/` after trimming leading/trailing slashes. An empty or
/// all-slash path has zero segments, so root matches root only.
fn split_segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
