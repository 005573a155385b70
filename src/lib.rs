//! GRTN redirect service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod telemetry;
pub mod wiki;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
