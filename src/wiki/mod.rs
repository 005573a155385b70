//! Route source: the wiki content backend.
//!
//! # Data Flow
//! ```text
//! client.rs  ──┬─ search {"match":{"grtn":true}}          ─┐
//!              └─ search {"match":{"grtnRedirects":true}} ─┴─ joined
//!     → types.rs (envelope → page records, field shapes)
//!     → source.rs (dedupe pages, extract RouteEntry values)
//!     → canonical.rs (page reference → public URL)
//! ```
//!
//! # Constraints
//! - A failed search fails the request; nothing stale or empty is served
//! - Malformed front matter is skipped per value, never per load

pub mod canonical;
pub mod client;
pub mod source;
pub mod types;

pub use canonical::CanonicalUrls;
pub use client::WikiClient;
pub use types::{Field, Page, SearchQuery, WikiError};
