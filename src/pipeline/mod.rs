//! Pipeline stages for document-to-PDF generation.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. switch the rendering engine) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! assets ──▶ layout ──▶ totals ──▶ markup ──▶ render
//! (fetch)   (3 modes)  (tax/net)  (HTML)     (Chromium)
//! ```
//!
//! 1. [`assets`] — fetch the logo and letterhead URLs concurrently and
//!    inline them as base64 data URIs; failures degrade, never abort
//! 2. [`layout`] — pure selection of the page composition from whichever
//!    assets actually resolved
//! 3. [`totals`] — derive tax amount and net payable from the
//!    caller-supplied aggregate; French-locale EUR formatting
//! 4. [`markup`] — build the pre-formatted view model and render the single
//!    self-contained HTML document
//! 5. [`render`] — print the markup to a paginated A4 PDF via headless
//!    Chromium; runs in `spawn_blocking` because the engine connection is
//!    synchronous

pub mod assets;
pub mod layout;
pub mod markup;
pub mod render;
pub mod totals;
