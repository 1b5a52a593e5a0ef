//! HTTP surface: one generation endpoint plus a liveness probe.
//!
//! The server is deliberately thin plumbing around
//! [`crate::generate::generate_pdf`]: permissive CORS, a large body limit
//! (payloads occasionally arrive with images accidentally pasted into text
//! fields), and a single error path. Every failure — malformed JSON
//! included — funnels to the same `500` + `Error: <message>` plain-text
//! response, so callers only ever distinguish "PDF" from "error string".
//!
//! Process-wide state is the fixed configuration, one shared fetch client,
//! and the semaphore bounding concurrent engine instances. Nothing is
//! shared between requests beyond those.

use crate::config::RenderConfig;
use crate::error::PdfError;
use crate::generate;
use crate::model::DocumentRequest;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Listen port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Request body limit. Large enough to tolerate multi-megabyte inline
/// images pasted into text fields; small enough to bound memory per
/// request.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RenderConfig>,
    client: reqwest::Client,
    render_slots: Arc<Semaphore>,
}

impl AppState {
    /// Build the state, including the shared asset-fetch client.
    pub fn new(config: RenderConfig) -> Result<Self, PdfError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("devis2pdf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PdfError::Internal(format!("HTTP client: {e}")))?;

        let render_slots = Arc::new(Semaphore::new(config.max_concurrent_renders));

        Ok(Self {
            config: Arc::new(config),
            client,
            render_slots,
        })
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(liveness))
        .route("/generate-pdf", post(generate_pdf_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(port: u16, config: RenderConfig) -> Result<(), PdfError> {
    let state = AppState::new(config)?;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PdfError::Internal(format!("bind {addr}: {e}")))?;

    info!("PDF service listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PdfError::Internal(format!("server: {e}")))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("shutdown signal received");
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn liveness() -> &'static str {
    "devis2pdf service is up"
}

/// `POST /generate-pdf` — the whole service.
///
/// The `Json` rejection is taken as a handler argument instead of failing
/// extraction so malformed payloads flow through the same 500 path as
/// render failures, matching what callers of the historical service expect.
async fn generate_pdf_handler(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            error!("Malformed payload: {rejection}");
            return error_response(rejection.body_text());
        }
    };

    // Wait for an engine slot; the cap keeps a request burst from launching
    // an unbounded fleet of Chromium instances.
    let _permit = match state.render_slots.acquire().await {
        Ok(permit) => permit,
        Err(_) => return error_response("render queue closed"),
    };

    match generate::generate_pdf(&req, &state.config, &state.client).await {
        Ok(pdf) => pdf_response(pdf),
        Err(e) => {
            error!("Generation failed: {e}");
            error_response(e.to_string())
        }
    }
}

fn pdf_response(pdf: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/pdf"),
            ),
            (header::CONTENT_LENGTH, HeaderValue::from(pdf.len())),
        ],
        pdf,
    )
        .into_response()
}

fn error_response(message: impl AsRef<str>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error: {}", message.as_ref()),
    )
        .into_response()
}
