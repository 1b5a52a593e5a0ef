//! # devis2pdf
//!
//! Turn a JSON description of a commercial document (quote/invoice) into a
//! paginated A4 PDF, rendered by headless Chromium.
//!
//! ## Why this crate?
//!
//! Hand-built PDF generators fight pagination, fonts, and flexbox for every
//! layout tweak. This crate instead synthesizes one self-contained HTML
//! document — remote logo and letterhead images fetched and inlined as
//! base64 data URIs — and lets a real browser engine do what it is best at:
//! lay the page out and print it. The service half wraps that pipeline in a
//! single HTTP endpoint that existing clients already speak.
//!
//! ## Pipeline Overview
//!
//! ```text
//! DocumentRequest (JSON)
//!  │
//!  ├─ 1. Assets   fetch logo + letterhead concurrently, inline as data URIs
//!  ├─ 2. Layout   Plain | LogoHeader | Letterhead, from what resolved
//!  ├─ 3. Totals   tax amount + net payable from the caller's aggregate
//!  ├─ 4. Markup   one Tera-rendered HTML document, French EUR formatting
//!  └─ 5. Render   headless Chromium prints A4 with backgrounds (spawn_blocking)
//! ```
//!
//! Asset fetches are best-effort: a dead logo URL degrades to a text
//! heading, a dead letterhead URL falls back to the standard header. Only
//! the render step can fail a request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use devis2pdf::{generate_pdf, DocumentRequest, RenderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let req: DocumentRequest = serde_json::from_str(
//!         r#"{"client_nom": "Dupont", "total_ht": 300,
//!             "prestations": [{"libelle": "Peinture", "quantite": 2,
//!                              "prix_unitaire": 150, "total_ht": 300}]}"#,
//!     )?;
//!     let client = reqwest::Client::new();
//!     let pdf = generate_pdf(&req, &RenderConfig::default(), &client).await?;
//!     std::fs::write("devis.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! Or run the service: `devis2pdf serve` listens on `PORT` (default 3000)
//! and answers `POST /generate-pdf`.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `devis2pdf` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! devis2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod pipeline;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RenderConfig, RenderConfigBuilder};
pub use error::{AssetError, PdfError};
pub use generate::{build_markup, generate_pdf};
pub use model::{DocumentRequest, LineItem};
pub use pipeline::layout::LayoutMode;
pub use server::{serve, DEFAULT_PORT, MAX_BODY_BYTES};
