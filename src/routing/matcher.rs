//! Route pattern matching.
//!
//! # Responsibilities
//! - Compile a route's `from` pattern into literal and parameter segments
//! - Match the request path against the compiled pattern
//! - Bind parameter names to the captured segment values
//!
//! # Design Decisions
//! - Anchored at the root and whole-path: segment counts must be equal
//! - Literal segments are case-sensitive and compared on decoded bytes
//! - Splitting happens before percent-decoding, so `%2F` never crosses a boundary
//! - Captures are re-encoded as a single URL path segment, so request data
//!   cannot add `/`, `?`, `&`, `=` or `#` to a destination
//! - An empty pattern matches nothing
//! - No regex, no wildcards: O(segments) per route

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

/// Parameter name → captured segment value, percent-encoded.
pub type Params = HashMap<String, String>;

/// Everything except RFC 3986 unreserved characters.
const CAPTURE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(Vec<u8>),
    Param(String),
}

/// A compiled `from` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern. Every string is a valid pattern; segments that are
    /// not exactly `:` followed by lowercase letters are literals.
    pub fn compile(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .map(|raw| match raw.strip_prefix(':').filter(|name| is_param_name(name)) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(decode(raw)),
            })
            .collect();
        Self { segments }
    }

    /// Match a request path. Returns the bound parameters on match.
    ///
    /// A name used twice must capture the same value at both positions.
    pub fn matches(&self, path: &str) -> Option<Params> {
        if self.segments.is_empty() {
            return None;
        }
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, raw) in self.segments.iter().zip(parts) {
            let value = decode(raw);
            match segment {
                Segment::Literal(literal) => {
                    if *literal != value {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    let encoded = percent_encode(&value, CAPTURE_ENCODE_SET).to_string();
                    match params.get(name) {
                        Some(bound) if *bound != encoded => return None,
                        Some(_) => {}
                        None => {
                            params.insert(name.clone(), encoded);
                        }
                    }
                }
            }
        }
        Some(params)
    }
}

/// `true` for one or more ASCII lowercase letters.
fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase())
}

/// Split a path into raw segments, relative to the root, ignoring trailing slashes.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let relative = path.strip_prefix('/').unwrap_or(path).trim_end_matches('/');
    (!relative.is_empty())
        .then(|| relative.split('/'))
        .into_iter()
        .flatten()
}

fn decode(raw: &str) -> Vec<u8> {
    percent_decode_str(raw).collect()
}
