//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: API keys, sink endpoints)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → shared via Arc through the request-handling chain
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets come from the environment at startup, never read per request

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::EdgeConfig;
pub use schema::Environment;
pub use schema::ErrorReportingConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::RedirectConfig;
pub use schema::TelemetryConfig;
pub use schema::WikiConfig;
