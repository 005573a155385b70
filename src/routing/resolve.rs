//! Disambiguation policy and fallback resolution.
//!
//! # Outcomes
//! ```text
//! special path?  "/"            → Landing (fixed redirect)
//!                "/routes.json" → RouteDump (no matching)
//!                "/favicon.ico" → NotFound (no routes, no backend)
//! match set:     0 routes       → Fallback (short-link service)
//!                1 route        → Resolved (redirect)
//!                2+ routes      → Ambiguous (list candidates, never guess)
//! ```

use std::future::Future;

use crate::config::RedirectConfig;
use crate::routing::entry::{MatchResult, RouteEntry};
use crate::routing::table::RouteTable;

pub const ROOT_PATH: &str = "/";
pub const ROUTES_JSON_PATH: &str = "/routes.json";
pub const FAVICON_PATH: &str = "/favicon.ico";

/// Paths handled before any route matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialPath {
    Landing,
    RouteDump,
    Favicon,
}

impl SpecialPath {
    fn classify(path: &str) -> Option<Self> {
        match path {
            ROOT_PATH => Some(SpecialPath::Landing),
            ROUTES_JSON_PATH => Some(SpecialPath::RouteDump),
            FAVICON_PATH => Some(SpecialPath::Favicon),
            _ => None,
        }
    }
}

/// Final outcome for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one route matched.
    Resolved(MatchResult),
    /// Several routes matched; a human has to pick.
    Ambiguous {
        path: String,
        candidates: Vec<MatchResult>,
    },
    /// No route matched; forwarded to the short-link service.
    Fallback { target: String },
    /// The root path.
    Landing { target: String },
    /// Every loaded route, unmatched.
    RouteDump(Vec<RouteEntry>),
    NotFound,
}

impl Resolution {
    /// Short label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Resolved(_) => "resolved",
            Resolution::Ambiguous { .. } => "ambiguous",
            Resolution::Fallback { .. } => "fallback",
            Resolution::Landing { .. } => "landing",
            Resolution::RouteDump(_) => "routes",
            Resolution::NotFound => "not_found",
        }
    }

    /// Destination when this outcome is a redirect.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(m) => Some(&m.target),
            Resolution::Fallback { target } | Resolution::Landing { target } => Some(target),
            _ => None,
        }
    }
}

/// Applies the disambiguation policy over a route table.
#[derive(Debug, Clone)]
pub struct Resolver {
    landing_url: String,
    fallback_base_url: String,
}

impl Resolver {
    pub fn new(config: &RedirectConfig) -> Self {
        Self {
            landing_url: config.landing_url.clone(),
            fallback_base_url: config.fallback_base_url.clone(),
        }
    }

    /// Whether a visit to `path` is recorded. Browsers probe the favicon on
    /// their own, so it is not.
    pub fn tracks_visit(&self, path: &str) -> bool {
        SpecialPath::classify(path) != Some(SpecialPath::Favicon)
    }

    /// Resolve `path`. `load` is awaited at most once, and only when the
    /// answer depends on the route table.
    pub async fn resolve<F, Fut, E>(&self, path: &str, load: F) -> Result<Resolution, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RouteTable, E>>,
    {
        let resolution = match SpecialPath::classify(path) {
            Some(SpecialPath::Landing) => Resolution::Landing {
                target: self.landing_url.clone(),
            },
            Some(SpecialPath::Favicon) => Resolution::NotFound,
            Some(SpecialPath::RouteDump) => {
                Resolution::RouteDump(load().await?.entries().cloned().collect())
            }
            None => self.resolve_matches(path, &load().await?),
        };
        Ok(resolution)
    }

    /// Apply the 0 / 1 / many policy to `path` over `table`.
    pub fn resolve_matches(&self, path: &str, table: &RouteTable) -> Resolution {
        let mut matches = table.match_path(path);
        match matches.len() {
            0 => Resolution::Fallback {
                target: self.fallback(path),
            },
            1 => Resolution::Resolved(matches.remove(0)),
            _ => Resolution::Ambiguous {
                path: path.to_string(),
                candidates: matches,
            },
        }
    }

    /// Forward an unmatched path onto the short-link service.
    pub fn fallback(&self, path: &str) -> String {
        format!("{}{}", self.fallback_base_url, path.trim_start_matches('/'))
    }
}
