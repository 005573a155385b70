//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single catch-all handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener, shut down gracefully
//! - Resolve each request: special paths, route loading, disambiguation
//! - Run visit tracking next to resolution and join it before responding
//! - Report failures before returning the failure page

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EdgeConfig;
use crate::http::request::{self, X_REQUEST_ID};
use crate::http::response;
use crate::observability::{metrics, ErrorReporter, FailureReport};
use crate::routing::{Resolution, Resolver, RouteTable};
use crate::telemetry::{TrackOutcome, Visit, VisitTracker};
use crate::wiki::{WikiClient, WikiError};

/// Application state injected into handlers. Immutable, shared per process;
/// nothing in it carries data from one request to the next.
pub struct AppState {
    pub config: Arc<EdgeConfig>,
    pub wiki: WikiClient,
    pub resolver: Resolver,
    pub tracker: VisitTracker,
    pub reporter: ErrorReporter,
}

impl AppState {
    pub fn new(config: Arc<EdgeConfig>, http: reqwest::Client) -> Self {
        Self {
            wiki: WikiClient::new(http.clone(), config.wiki.clone()),
            resolver: Resolver::new(&config.redirects),
            tracker: VisitTracker::new(http.clone(), config.telemetry.clone()),
            reporter: ErrorReporter::new(http, config.error_reporting.clone()),
            config,
        }
    }
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
    config: Arc<EdgeConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, reqwest::Error> {
        let config = Arc::new(config);
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let state = Arc::new(AppState::new(config.clone(), http));
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", any(redirect_handler))
            .route("/{*path}", any(redirect_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let request_id = req
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Router with all layers, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = self.config.environment.as_str(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }
}

/// Catch-all handler: every path is a potential short link.
async fn redirect_handler(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let context = request::context(&request);
    let path = context.uri.path().to_string();

    tracing::debug!(
        request_id = %context.request_id,
        method = %context.method,
        path = %path,
        "Resolving path"
    );

    let visit = Visit {
        path: path.clone(),
        client_ip: request::client_ip(
            &context.headers,
            state.tracker.client_ip_header(),
            request::peer_addr(&request),
        ),
    };

    let tracking = async {
        if state.resolver.tracks_visit(&path) {
            state.tracker.track(&visit).await
        } else {
            TrackOutcome::Skipped
        }
    };
    let (resolution, _) = tokio::join!(resolve_path(&state, &path), tracking);

    let (outcome, response) = match resolution {
        Ok(resolution) => {
            let outcome = resolution.outcome();
            tracing::info!(
                request_id = %context.request_id,
                path = %path,
                outcome,
                target = resolution.redirect_target().unwrap_or(""),
                "Path resolved"
            );
            (outcome, response::from_resolution(resolution))
        }
        Err(error) => {
            tracing::error!(
                request_id = %context.request_id,
                path = %path,
                error = %error,
                "Route resolution failed"
            );
            let report = FailureReport::new(&context, &error, state.config.environment);
            state.reporter.report(&report).await;
            (
                "error",
                response::failure(&error, &context.request_id, state.config.environment),
            )
        }
    };

    metrics::record_request(outcome, response.status().as_u16(), start_time);
    response
}

/// Resolve `path`, loading this request's route table only when needed.
async fn resolve_path(state: &AppState, path: &str) -> Result<Resolution, WikiError> {
    state
        .resolver
        .resolve(path, || async {
            state.wiki.load_routes().await.map(|routes| {
                let table = RouteTable::new(routes);
                tracing::debug!(routes = table.len(), "Route table built");
                table
            })
        })
        .await
}
