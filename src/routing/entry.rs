//! Route data model.

use serde::{Deserialize, Serialize};

/// One redirect rule declared by a wiki page.
///
/// Immutable once constructed; a fresh set is built for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path pattern: literal segments and `:name` parameter segments.
    pub from: String,
    /// Destination template, may embed `:name` placeholders.
    pub to: String,
    /// Canonical URL of the page that declared this rule.
    pub definition: String,
}

impl RouteEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            definition: definition.into(),
        }
    }
}

/// A route that matched the request path, with its destination filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub route: RouteEntry,
    /// Concrete destination after parameter substitution.
    pub target: String,
}

impl MatchResult {
    /// Page that declared the matched route.
    pub fn definition(&self) -> &str {
        &self.route.definition
    }
}
