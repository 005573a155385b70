//! Redirect resolution engine.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → resolve.rs (special paths: "/", "/routes.json", "/favicon.ico")
//!     → table.rs (every route loaded for this request)
//!     → matcher.rs (compiled pattern vs path, bind parameters)
//!     → destination.rs (fill `:name` placeholders in the target)
//!     → resolve.rs (0 → fallback, 1 → redirect, 2+ → ambiguous)
//! ```
//!
//! # Design Decisions
//! - Route table rebuilt per request, never cached
//! - Whole-path matching: literal and `:name` segments only
//! - No priorities: ambiguity is surfaced, not silently resolved
//! - No regex in the matching path

pub mod destination;
pub mod entry;
pub mod matcher;
pub mod resolve;
pub mod table;

pub use entry::{MatchResult, RouteEntry};
pub use matcher::{Params, PathPattern};
pub use resolve::{Resolution, Resolver};
pub use table::RouteTable;
