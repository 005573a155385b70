//! Canonical page URLs.

use crate::config::WikiConfig;

/// Maps page references to their public URL.
///
/// `Events/<rest>` → `<site>/event/<rest>`, anything else → `<site>/wiki/<ref>`.
#[derive(Debug, Clone)]
pub struct CanonicalUrls {
    site_url: String,
    event_prefix: String,
}

impl CanonicalUrls {
    pub fn new(site_url: &str, event_prefix: &str) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            event_prefix: event_prefix.to_string(),
        }
    }

    pub fn from_config(config: &WikiConfig) -> Self {
        Self::new(&config.site_url, &config.event_prefix)
    }

    pub fn page_url(&self, page_ref: &str) -> String {
        match page_ref.strip_prefix(self.event_prefix.as_str()) {
            Some(event) if !self.event_prefix.is_empty() => {
                format!("{}/event/{}", self.site_url, event)
            }
            _ => format!("{}/wiki/{}", self.site_url, page_ref),
        }
    }
}
