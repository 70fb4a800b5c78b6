//! HTTP endpoint for profile lookups.
//!
//! Stands in for the functions runtime: one POST route taking the lookup
//! event as JSON and answering with the profile, `null`, or an error.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::LookupError;
use crate::domain::models::{LookupRequest, ServerConfig};
use crate::services::{ContextLinkTask, ProfileLookupService};

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

struct AppState {
    service: ProfileLookupService,
    pending_links: Mutex<Vec<ContextLinkTask>>,
}

impl AppState {
    fn new(service: ProfileLookupService) -> Self {
        Self {
            service,
            pending_links: Mutex::new(Vec::new()),
        }
    }

    fn track(&self, task: ContextLinkTask) {
        if let Ok(mut pending) = self.pending_links.lock() {
            pending.retain(|link| !link.is_finished());
            pending.push(task);
        }
    }

    /// Wait for every context link still running. Returns how many were awaited.
    async fn drain_links(&self) -> usize {
        let pending = self
            .pending_links
            .lock()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default();

        let count = pending.len();
        for task in pending {
            if let Err(err) = task.wait().await {
                tracing::debug!(error = %err, "context link ended with error during shutdown");
            }
        }
        count
    }
}

/// Profile lookup HTTP server
pub struct ProfileLookupHttpServer {
    config: ServerConfig,
    service: ProfileLookupService,
}

impl ProfileLookupHttpServer {
    pub fn new(service: ProfileLookupService, config: ServerConfig) -> Self {
        Self { config, service }
    }

    /// Build the router.
    pub fn build_router(self) -> Router {
        let state = Arc::new(AppState::new(self.service));
        router(state, &self.config)
    }

    /// Start the server with a shutdown signal.
    ///
    /// After the signal, in-flight requests finish and then any context links
    /// they started are awaited before returning.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let state = Arc::new(AppState::new(self.service));
        let app = router(Arc::clone(&state), &self.config);

        tracing::info!(
            "Profile lookup HTTP server listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        let drained = state.drain_links().await;
        if drained > 0 {
            tracing::info!(count = drained, "waited for pending context links");
        }
        Ok(())
    }
}

fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/profile-lookup", post(profile_lookup))
        .route("/health", get(health_check))
        .with_state(state);

    if config.enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

async fn health_check() -> &'static str {
    "OK"
}

// The response never waits for context linking; the link is tracked for shutdown.
async fn profile_lookup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LookupRequest>,
) -> Result<Response, LookupError> {
    let outcome = state.service.lookup(&request).await?;
    if let Some(task) = outcome.context_link {
        state.track(task);
    }
    Ok(Json(outcome.profile).into_response())
}
