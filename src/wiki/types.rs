//! Content backend payload shapes and error definitions.
//!
//! Front matter is untyped at the source, so fields are classified at the
//! boundary instead of trusted against a static schema.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Front-matter field carrying a page's single shortcut path.
pub const SHORTCUT_FIELD: &str = "grtn";
/// Front-matter field carrying a path → destination mapping.
pub const REDIRECTS_FIELD: &str = "grtnRedirects";

/// The two independent searches issued per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchQuery {
    /// Pages tagged with a shortcut.
    Shortcuts,
    /// Pages tagged with a redirect mapping.
    Redirects,
}

impl SearchQuery {
    /// Front-matter field this query selects on.
    pub fn field(&self) -> &'static str {
        match self {
            SearchQuery::Shortcuts => SHORTCUT_FIELD,
            SearchQuery::Redirects => REDIRECTS_FIELD,
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Errors that can occur while loading routes from the content backend.
#[derive(Debug, Error)]
pub enum WikiError {
    /// Connection, timeout or body read failed.
    #[error("{query} search request failed: {source}")]
    Request {
        query: SearchQuery,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status.
    #[error("HTTP error! status: {status} ({query} search)")]
    Status { query: SearchQuery, status: u16 },

    /// Response body was not the expected envelope.
    #[error("{query} search returned an unreadable envelope: {reason}")]
    Envelope { query: SearchQuery, reason: String },
}

/// Locate the page list inside a search response.
pub fn envelope_results(body: &Value) -> Option<&Vec<Value>> {
    body.pointer("/result/data/results")?.as_array()
}

/// Shape of one front-matter field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Absent,
    Text(&'a str),
    Mapping(&'a Map<String, Value>),
    /// Present, but neither a string nor a mapping.
    Malformed(&'a Value),
}

impl<'a> From<Option<&'a Value>> for Field<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Field::Absent,
            Some(Value::String(s)) => Field::Text(s),
            Some(Value::Object(map)) => Field::Mapping(map),
            Some(other) => Field::Malformed(other),
        }
    }
}

/// One page record from a search result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub page_ref: String,
    front_matter: Option<Map<String, Value>>,
}

impl Page {
    pub fn new(page_ref: impl Into<String>, front_matter: Option<Map<String, Value>>) -> Self {
        Self {
            page_ref: page_ref.into(),
            front_matter,
        }
    }

    /// Read a page record. `None` when `pageRef` is missing or not a string;
    /// a non-object `frontMatter` is treated as absent.
    pub fn from_value(record: &Value) -> Option<Self> {
        let page_ref = record.get("pageRef")?.as_str()?;
        let front_matter = record
            .get("frontMatter")
            .and_then(Value::as_object)
            .cloned();
        Some(Self::new(page_ref, front_matter))
    }

    pub fn field(&self, name: &str) -> Field<'_> {
        Field::from(self.front_matter.as_ref().and_then(|fm| fm.get(name)))
    }

    pub fn shortcut(&self) -> Field<'_> {
        self.field(SHORTCUT_FIELD)
    }

    pub fn redirects(&self) -> Field<'_> {
        self.field(REDIRECTS_FIELD)
    }
}
