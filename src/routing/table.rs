//! Route table for a single request.
//!
//! # Responsibilities
//! - Hold every route loaded for the current request, in discovery order
//! - Compile each `from` pattern once
//! - Evaluate every route against a path and collect the matches
//!
//! # Design Decisions
//! - Built fresh per request, never cached or shared across requests
//! - Immutable after construction
//! - No priorities: all matches are returned in discovery order

use crate::routing::destination::substitute;
use crate::routing::entry::{MatchResult, RouteEntry};
use crate::routing::matcher::PathPattern;

#[derive(Debug, Clone)]
struct CompiledRoute {
    entry: RouteEntry,
    pattern: PathPattern,
}

/// Compiled routes available to one request.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        let routes = entries
            .into_iter()
            .map(|entry| CompiledRoute {
                pattern: PathPattern::compile(&entry.from),
                entry,
            })
            .collect();
        Self { routes }
    }

    /// All routes, in discovery order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().map(|r| &r.entry)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every route whose pattern matches `path`, with its target resolved.
    pub fn match_path(&self, path: &str) -> Vec<MatchResult> {
        self.routes
            .iter()
            .filter_map(|route| {
                route.pattern.matches(path).map(|params| MatchResult {
                    target: substitute(&route.entry.to, &params),
                    route: route.entry.clone(),
                })
            })
            .collect()
    }
}
