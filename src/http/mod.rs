//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → request.rs (request ID, client IP, failure context)
//!     → [routing engine resolves the path]
//!     → response.rs (redirect / JSON / HTML / failure)
//!     → render.rs (HTML markup)
//!     → Send to client
//! ```

pub mod render;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
