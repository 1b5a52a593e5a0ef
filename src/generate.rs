//! Top-level generation entry points.
//!
//! One request flows through here exactly once: resolve the remote images,
//! pick the layout, synthesize the markup, print it. Nothing is cached
//! between requests and nothing is retried — a request ends in either a
//! complete PDF or a single fatal error.
//!
//! [`build_markup`] stops after synthesis and exists as its own public
//! surface because the markup is the deterministic half of the pipeline:
//! callers (and the test suite) can compare it byte-for-byte without an
//! engine install.

use crate::config::RenderConfig;
use crate::error::PdfError;
use crate::model::DocumentRequest;
use crate::pipeline::{assets, layout::LayoutMode, markup, render};
use std::time::Instant;
use tracing::{debug, info};

/// Generate the PDF for one document request.
///
/// The shared `client` is only used for the logo/letterhead fetches; asset
/// failures degrade to the text fallback and never surface here.
///
/// # Errors
/// Returns `Err(PdfError)` only for fatal failures: engine launch, page
/// setup, capture, timeout, or template errors.
pub async fn generate_pdf(
    req: &DocumentRequest,
    config: &RenderConfig,
    client: &reqwest::Client,
) -> Result<Vec<u8>, PdfError> {
    let start = Instant::now();
    info!(
        "Generating {} n°{} for '{}'",
        req.type_label(),
        req.numero_label(),
        req.client_nom
    );

    // ── Step 1+2: Resolve assets, select layout ──────────────────────────
    let mode = resolve_layout(req, config, client).await;

    // ── Step 3: Synthesize markup ────────────────────────────────────────
    let markup = markup::render_document(req, &mode, config)?;
    debug!("Markup synthesized: {} bytes", markup.len());

    // ── Step 4: Print via the engine ─────────────────────────────────────
    let pdf = render::render_pdf(markup, config).await?;

    info!(
        "Generated {} bytes in {}ms",
        pdf.len(),
        start.elapsed().as_millis()
    );
    Ok(pdf)
}

/// Synthesize the markup for one request without invoking the engine.
pub async fn build_markup(
    req: &DocumentRequest,
    config: &RenderConfig,
    client: &reqwest::Client,
) -> Result<String, PdfError> {
    let mode = resolve_layout(req, config, client).await;
    Ok(markup::render_document(req, &mode, config)?)
}

/// Fetch both remote images concurrently and fold the outcome into a
/// layout mode. The slower fetch delays synthesis; neither can fail the
/// request.
async fn resolve_layout(
    req: &DocumentRequest,
    config: &RenderConfig,
    client: &reqwest::Client,
) -> LayoutMode {
    let (logo, letterhead) = futures::join!(
        assets::resolve_image(client, req.user_logo.as_deref(), config.asset_timeout_secs),
        assets::resolve_image(
            client,
            req.user_papier_entete.as_deref(),
            config.asset_timeout_secs
        ),
    );

    let mode = LayoutMode::select(logo, letterhead);
    debug!("Layout mode: {}", mode.name());
    mode
}
