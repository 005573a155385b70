//! Route extraction from page records.
//!
//! # Responsibilities
//! - Turn a page's shortcut into one route pointing at the page itself
//! - Turn each string pair of a page's redirect mapping into a route
//! - Skip malformed values without failing the rest
//! - Contribute each page once, even if both searches returned it
//!
//! # Design Decisions
//! - Pages are de-duplicated by `pageRef` before extraction. This is a
//!   deliberate departure from processing both result lists as-is: a page
//!   carrying both fields comes back from both searches, and counting it
//!   twice would make each of its routes collide with itself. As a result
//!   `/routes.json` lists each declared route once.

use std::collections::HashSet;

use crate::routing::RouteEntry;
use crate::wiki::canonical::CanonicalUrls;
use crate::wiki::types::{Field, Page, REDIRECTS_FIELD, SHORTCUT_FIELD};

/// Drop repeated page references, keeping first-seen order.
pub fn dedupe_pages(pages: impl IntoIterator<Item = Page>) -> Vec<Page> {
    let mut seen = HashSet::new();
    pages
        .into_iter()
        .filter(|page| seen.insert(page.page_ref.clone()))
        .collect()
}

/// Build every route declared by `pages`, in page order.
pub fn extract_routes(pages: &[Page], urls: &CanonicalUrls) -> Vec<RouteEntry> {
    let mut routes = Vec::new();

    for page in pages {
        let definition = urls.page_url(&page.page_ref);

        match page.shortcut() {
            Field::Text(shortcut) => {
                routes.push(RouteEntry::new(shortcut, definition.clone(), definition.clone()));
            }
            Field::Absent => {}
            _ => {
                tracing::debug!(page = %page.page_ref, field = SHORTCUT_FIELD, "Skipping non-string shortcut");
            }
        }

        match page.redirects() {
            Field::Mapping(mapping) => {
                for (from, to) in mapping {
                    match to.as_str() {
                        Some(to) => routes.push(RouteEntry::new(from, to, definition.clone())),
                        None => tracing::debug!(
                            page = %page.page_ref,
                            from = %from,
                            "Skipping non-string redirect target"
                        ),
                    }
                }
            }
            Field::Absent => {}
            _ => {
                tracing::debug!(page = %page.page_ref, field = REDIRECTS_FIELD, "Skipping non-mapping redirects");
            }
        }
    }

    routes
}
