//! Configuration types for document rendering.
//!
//! All rendering behaviour is controlled through [`RenderConfig`], built via
//! its [`RenderConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share the config across requests, log it, and diff two
//! deployments to understand why their output differs.

use crate::error::PdfError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for PDF generation.
///
/// Built via [`RenderConfig::builder()`] or [`RenderConfig::default()`].
///
/// # Example
/// ```rust
/// use devis2pdf::RenderConfig;
///
/// let config = RenderConfig::builder()
///     .render_timeout_secs(120)
///     .max_concurrent_renders(4)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Top page margin in millimetres. Default: 50.
    ///
    /// The top band is tall because the repeating header (logo, issuer
    /// details, document number) lives inside it; shrinking it makes body
    /// content flow under the header.
    pub margin_top_mm: f64,

    /// Bottom page margin in millimetres. Default: 20.
    pub margin_bottom_mm: f64,

    /// Left/right page margin in millimetres. Default: 15.
    pub margin_side_mm: f64,

    /// Render deadline in seconds. Default: 90.
    ///
    /// One Chromium instance is launched per request; if it has not produced
    /// a PDF within this window the request fails with
    /// [`PdfError::RenderTimeout`]. Documents with many remote-free pages
    /// render in a few seconds; the margin covers slow cold starts on small
    /// containers.
    pub render_timeout_secs: u64,

    /// Per-image fetch timeout in seconds. Default: 30.
    ///
    /// Applies independently to the logo and letterhead fetches. A fetch
    /// that exceeds it degrades to the absent-image fallback; it never fails
    /// the render.
    pub asset_timeout_secs: u64,

    /// Maximum Chromium instances alive at once. Default: 2.
    ///
    /// The engine is the dominant memory cost of a request; an unbounded
    /// fleet of instances takes small hosts down under load spikes. Requests
    /// beyond the cap wait for a slot.
    pub max_concurrent_renders: usize,

    /// Browser executable path. `None` auto-detects an installed
    /// Chrome/Chromium.
    pub browser_path: Option<PathBuf>,

    /// Run the engine with its sandbox enabled. Default: `false`.
    ///
    /// Containerized hosts usually lack the kernel facilities the Chromium
    /// sandbox needs; the service targets those hosts, so the sandbox is off
    /// unless explicitly requested.
    pub sandbox: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin_top_mm: 50.0,
            margin_bottom_mm: 20.0,
            margin_side_mm: 15.0,
            render_timeout_secs: 90,
            asset_timeout_secs: 30,
            max_concurrent_renders: 2,
            browser_path: None,
            sandbox: false,
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn margin_top_mm(mut self, mm: f64) -> Self {
        self.config.margin_top_mm = mm.clamp(0.0, 150.0);
        self
    }

    pub fn margin_bottom_mm(mut self, mm: f64) -> Self {
        self.config.margin_bottom_mm = mm.clamp(0.0, 150.0);
        self
    }

    pub fn margin_side_mm(mut self, mm: f64) -> Self {
        self.config.margin_side_mm = mm.clamp(0.0, 80.0);
        self
    }

    pub fn render_timeout_secs(mut self, secs: u64) -> Self {
        self.config.render_timeout_secs = secs.max(5);
        self
    }

    pub fn asset_timeout_secs(mut self, secs: u64) -> Self {
        self.config.asset_timeout_secs = secs.max(1);
        self
    }

    pub fn max_concurrent_renders(mut self, n: usize) -> Self {
        self.config.max_concurrent_renders = n.max(1);
        self
    }

    pub fn browser_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.browser_path = Some(path.into());
        self
    }

    pub fn sandbox(mut self, enabled: bool) -> Self {
        self.config.sandbox = enabled;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, PdfError> {
        let c = &self.config;
        if c.render_timeout_secs < 5 || c.render_timeout_secs > 600 {
            return Err(PdfError::InvalidConfig(format!(
                "render timeout must be 5–600s, got {}",
                c.render_timeout_secs
            )));
        }
        if c.max_concurrent_renders == 0 {
            return Err(PdfError::InvalidConfig(
                "max_concurrent_renders must be ≥ 1".into(),
            ));
        }
        if c.margin_top_mm + c.margin_bottom_mm >= 250.0 {
            return Err(PdfError::InvalidConfig(
                "vertical margins leave no room for content on an A4 page".into(),
            ));
        }
        Ok(self.config)
    }
}
