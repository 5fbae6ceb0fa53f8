//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (CORS, request ID, tracing)
//! - Evaluate the routing table for every request
//! - Forward API requests to the backend
//! - Bind to a pre-bound listener and serve until shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::cors::apply_cors;
use crate::http::proxy::{self, UpstreamClient};
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::http::static_page;
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::{decide, RouteDecision, API_PREFIX};

/// Application state injected into the relay handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub client: UpstreamClient,
}

/// The relay HTTP server.
pub struct RelayServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl RelayServer {
    /// Create a new relay server from a validated configuration.
    pub fn new(config: RelayConfig) -> Self {
        let config = Arc::new(config);

        // One client shared by all outbound legs.
        let client: UpstreamClient =
            Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            config: config.clone(),
            client,
        };
        let router = Self::build_router(state);

        Self { router, config }
    }

    /// Build the Axum router: every path lands in the relay handler.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(relay_handler))
            .route("/{*path}", any(relay_handler))
            .with_state(state)
            .layer(axum::middleware::from_fn(apply_cors))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.serve(listener, shutdown_signal()).await
    }

    /// Run the server until the given shutdown receiver fires.
    ///
    /// Used by tests and embedders that manage their own signals.
    pub async fn run_until(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        self.serve(listener, async move {
            let _ = shutdown.recv().await;
        })
        .await
    }

    async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;

        // Startup banner
        tracing::info!(address = %addr, "Relay listening");
        tracing::info!(
            backend = %self.config.backend.origin(),
            prefix = API_PREFIX,
            "Forwarding API requests"
        );
        tracing::info!(
            page = %self.config.static_page.path.display(),
            "Serving root page"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Relay stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay handler: evaluates the routing table for every request.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    match decide(&method, &path) {
        RouteDecision::Preflight => StatusCode::OK.into_response(),
        RouteDecision::StaticPage => static_page::serve_page(&state.config.static_page.path).await,
        RouteDecision::Proxy => proxy_leg(state, request_id, path, request).await,
        RouteDecision::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// The proxied leg: buffer the body, dial the backend, relay the response.
async fn proxy_leg(
    state: AppState,
    request_id: String,
    path: String,
    request: Request<Body>,
) -> Response {
    // The whole body is accumulated before dialing out. Maximum request
    // size is bounded by available memory; there is no configured limit.
    let body = match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    let result = proxy::forward(
        &state.client,
        &state.config.backend.authority(),
        &path,
        body,
        state.config.timeouts.upstream(),
    )
    .await;

    match result {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                status = %response.status(),
                "Relayed backend response"
            );
            response
        }
        Err(e) => {
            // The reason stays in the log; the caller gets the fixed JSON body.
            tracing::error!(request_id = %request_id, error = %e, "Backend request failed");
            proxy::bad_gateway()
        }
    }
}
