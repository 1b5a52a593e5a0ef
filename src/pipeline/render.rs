//! PDF capture: print the synthesized markup via headless Chromium.
//!
//! ## Why spawn_blocking?
//!
//! The `headless_chrome` crate drives the browser over a synchronous
//! DevTools-protocol connection. `tokio::task::spawn_blocking` moves that
//! work onto the blocking thread pool so the async workers keep serving
//! other requests while the engine grinds through layout and print.
//!
//! ## Why a temp file?
//!
//! The engine navigates to URLs — it cannot be handed a markup string
//! directly, and a `data:` URL breaks down at the multi-megabyte sizes that
//! inlined letterhead images produce. Writing the markup into a `TempDir`
//! gives the engine a `file://` URL while guaranteeing cleanup when the
//! directory guard drops, even if the render panics.
//!
//! ## Engine lifetime
//!
//! One browser process per request: launched at the top of the blocking
//! closure, owned by it, and therefore torn down on the success, error, and
//! panic paths alike. Nothing engine-related survives the request.

use crate::config::RenderConfig;
use crate::error::PdfError;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tracing::{debug, info};

/// A4 paper size in inches, as the DevTools protocol expects.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

/// Flags for constrained containerized hosts: no usable /dev/shm, no
/// setuid helper. The sandbox itself is controlled by
/// [`RenderConfig::sandbox`].
const ENGINE_FLAGS: &[&str] = &["--disable-dev-shm-usage", "--disable-setuid-sandbox"];

/// Print the markup to a PDF, failing after the configured deadline.
pub async fn render_pdf(markup: String, config: &RenderConfig) -> Result<Vec<u8>, PdfError> {
    let deadline = Duration::from_secs(config.render_timeout_secs);
    let cfg = config.clone();

    let task = tokio::task::spawn_blocking(move || render_blocking(&markup, &cfg));

    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(PdfError::Internal(format!(
            "Render task panicked: {join_err}"
        ))),
        Err(_) => Err(PdfError::RenderTimeout {
            secs: config.render_timeout_secs,
        }),
    }
}

/// Blocking implementation: launch, load, print, tear down.
fn render_blocking(markup: &str, config: &RenderConfig) -> Result<Vec<u8>, PdfError> {
    let start = Instant::now();

    let temp_dir =
        TempDir::new().map_err(|e| PdfError::Internal(format!("temp dir: {e}")))?;
    let page_path = temp_dir.path().join("document.html");
    std::fs::write(&page_path, markup)
        .map_err(|e| PdfError::Internal(format!("temp markup file: {e}")))?;

    let args: Vec<&OsStr> = ENGINE_FLAGS.iter().map(OsStr::new).collect();
    let launch_options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(config.sandbox)
        .args(args)
        .path(config.browser_path.clone())
        .idle_browser_timeout(Duration::from_secs(config.render_timeout_secs))
        .build()
        .map_err(|e| PdfError::BrowserLaunch {
            detail: e.to_string(),
        })?;

    let browser = Browser::new(launch_options).map_err(|e| PdfError::BrowserLaunch {
        detail: e.to_string(),
    })?;

    let tab = browser.new_tab().map_err(|e| PdfError::PageSetup {
        detail: e.to_string(),
    })?;
    tab.set_default_timeout(Duration::from_secs(config.render_timeout_secs));

    let url = format!("file://{}", page_path.display());
    tab.navigate_to(&url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| PdfError::PageSetup {
            detail: e.to_string(),
        })?;

    let pdf = tab
        .print_to_pdf(Some(print_options()))
        .map_err(|e| PdfError::PdfCapture {
            detail: e.to_string(),
        })?;

    debug!("Engine produced {} bytes", pdf.len());
    info!("Rendered PDF in {}ms", start.elapsed().as_millis());

    // `browser` and `temp_dir` drop here, on every path.
    Ok(pdf)
}

/// Print settings shared by every layout mode: A4, background graphics on,
/// zero engine margins (the markup simulates the page scheme itself), CSS
/// page size honoured, no engine header/footer.
fn print_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        display_header_footer: Some(false),
        paper_width: Some(A4_WIDTH_IN),
        paper_height: Some(A4_HEIGHT_IN),
        margin_top: Some(0.0),
        margin_bottom: Some(0.0),
        margin_left: Some(0.0),
        margin_right: Some(0.0),
        prefer_css_page_size: Some(true),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_options_keep_backgrounds_and_zero_margins() {
        let opts = print_options();
        assert_eq!(opts.print_background, Some(true));
        assert_eq!(opts.display_header_footer, Some(false));
        assert_eq!(opts.margin_top, Some(0.0));
        assert_eq!(opts.margin_bottom, Some(0.0));
        assert_eq!(opts.prefer_css_page_size, Some(true));
    }

    #[test]
    fn print_options_use_a4_paper() {
        let opts = print_options();
        assert_eq!(opts.paper_width, Some(A4_WIDTH_IN));
        assert_eq!(opts.paper_height, Some(A4_HEIGHT_IN));
    }
}
