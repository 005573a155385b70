//! GRTN redirect service.
//!
//! Resolves short paths to destination URLs declared on wiki pages.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                  REDIRECT SERVICE                    │
//!                    │                                                      │
//!   Client Request   │  ┌──────────┐    ┌──────────────┐    ┌────────────┐  │
//!   ─────────────────┼─▶│   http   │───▶│   routing    │───▶│  response  │──┼──▶ 302 / HTML / JSON
//!                    │  │  server  │    │   resolve    │    │   render   │  │
//!                    │  └────┬─────┘    └──────┬───────┘    └────────────┘  │
//!                    │       │                 │ route table per request    │
//!                    │       ▼                 ▼                            │
//!                    │  ┌──────────┐    ┌──────────────┐                    │
//!                    │  │telemetry │    │     wiki     │◀── two searches ───┼──── Content backend
//!                    │  │  visit   │    │    client    │     (concurrent)   │
//!                    │  └────┬─────┘    └──────────────┘                    │
//!                    │       └──────────────────────────────────────────────┼───▶ Analytics sink
//!                    │                                                      │
//!                    │  config · observability (logs, metrics, error sink)  │
//!                    │  resilience (deadlines) · lifecycle (shutdown)       │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use grtn_redirect::config::load_config;
use grtn_redirect::lifecycle::startup;
use grtn_redirect::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "grtn-redirect")]
#[command(about = "Short-link redirect service backed by wiki front matter", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long, env = "GRTN_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);
    tracing::info!("grtn-redirect v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await
}
