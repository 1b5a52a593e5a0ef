//! Error types for the devis2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PdfError`] — **Fatal**: the request cannot produce a PDF (engine
//!   launch failure, render timeout, template failure). Returned as
//!   `Err(PdfError)` from [`crate::generate::generate_pdf`] and mapped to
//!   the single HTTP 500 path by the server.
//!
//! * [`AssetError`] — **Non-fatal**: one remote image could not be fetched
//!   (unreachable host, non-success status, timeout). Logged at `warn` by
//!   the asset resolver and degraded to an absent image; the render
//!   continues with the text fallback.
//!
//! There is no partial-success response: a request yields either a complete
//! PDF or one error string, and nothing is retried.

use thiserror::Error;

/// All fatal errors returned by the devis2pdf library.
///
/// Asset-fetch failures use [`AssetError`] and never reach this type.
#[derive(Debug, Error)]
pub enum PdfError {
    // ── Engine errors ─────────────────────────────────────────────────────
    /// Headless Chromium could not be launched.
    #[error(
        "Failed to launch the browser engine: {detail}\n\
         Ensure Chrome or Chromium is installed, or point DEVIS2PDF_BROWSER \
         at the executable."
    )]
    BrowserLaunch { detail: String },

    /// A tab could not be opened or the markup document failed to load.
    #[error("Browser page setup failed: {detail}")]
    PageSetup { detail: String },

    /// The engine accepted the page but printing it to PDF failed.
    #[error("PDF capture failed: {detail}")]
    PdfCapture { detail: String },

    /// The render did not finish within the configured deadline.
    #[error("Rendering timed out after {secs}s\nIncrease render_timeout_secs for very large documents.")]
    RenderTimeout { secs: u64 },

    // ── Markup errors ─────────────────────────────────────────────────────
    /// The document template failed to render.
    #[error("Markup synthesis failed: {0}")]
    Template(#[from] tera::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal failure to resolve one remote image.
///
/// Produced inside the asset resolver, logged, and swallowed; the layout
/// selector simply sees the image as absent.
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    /// The transport reported an error (DNS, connect, TLS, read).
    #[error("image fetch failed for '{url}': {reason}")]
    Fetch { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("image fetch for '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The fetch exceeded the configured per-asset timeout.
    #[error("image fetch for '{url}' timed out after {secs}s")]
    Timeout { url: String, secs: u64 },
}
