//! Remote image resolution: fetch a URL and inline it as a `data:` URI.
//!
//! The rendering engine loads the markup from a local file with no network
//! access of its own, so every remote image must be embedded in the markup
//! before the render starts. Fetches are strictly best-effort: any failure
//! (unreachable host, non-success status, timeout) is logged and collapses
//! to `None`, and the layout selector falls back to the text-only
//! composition. Nothing is retried and nothing is cached — an image lives
//! exactly as long as the request that fetched it.

use crate::error::AssetError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;
use tracing::{debug, warn};

/// A fetched image, base64-embedded and ready for direct inclusion in
/// markup without a separate fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// `data:<content_type>;base64,<payload>`.
    pub data_uri: String,
    /// The content type baked into the URI.
    pub content_type: String,
}

/// Resolve an optional image URL to an inline image.
///
/// Returns `None` for an absent or blank URL and for every fetch failure;
/// this function never propagates an error to the caller.
pub async fn resolve_image(
    client: &reqwest::Client,
    url: Option<&str>,
    timeout_secs: u64,
) -> Option<InlineImage> {
    let url = url?.trim();
    if url.is_empty() {
        return None;
    }

    match fetch_image(client, url, timeout_secs).await {
        Ok(image) => {
            debug!(
                "Inlined image from {} ({}, {} bytes base64)",
                url,
                image.content_type,
                image.data_uri.len()
            );
            Some(image)
        }
        Err(e) => {
            warn!("{e}; rendering without it");
            None
        }
    }
}

async fn fetch_image(
    client: &reqwest::Client,
    url: &str,
    timeout_secs: u64,
) -> Result<InlineImage, AssetError> {
    let response = client
        .get(url)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AssetError::Timeout {
                    url: url.to_string(),
                    secs: timeout_secs,
                }
            } else {
                AssetError::Fetch {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

    if !response.status().is_success() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let declared = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            AssetError::Timeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            AssetError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    let content_type = declared_image_type(declared.as_deref())
        .unwrap_or_else(|| sniffed_image_type(&bytes));

    Ok(inline(&bytes, &content_type))
}

/// Extract a usable image content type from a `Content-Type` header value,
/// dropping any parameters (`; charset=…`). Non-image types are ignored so
/// a misconfigured server sending `text/html` falls through to sniffing.
fn declared_image_type(header: Option<&str>) -> Option<String> {
    let essence = header?.split(';').next()?.trim().to_ascii_lowercase();
    essence.starts_with("image/").then_some(essence)
}

/// Guess the content type from the payload's magic bytes, defaulting to
/// `image/png` when the format is unrecognised.
fn sniffed_image_type(bytes: &[u8]) -> String {
    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => "image/png".to_string(),
    }
}

fn inline(bytes: &[u8], content_type: &str) -> InlineImage {
    InlineImage {
        data_uri: format!("data:{content_type};base64,{}", STANDARD.encode(bytes)),
        content_type: content_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];

    #[test]
    fn inline_builds_tagged_data_uri() {
        let img = inline(b"hello", "image/png");
        assert_eq!(img.data_uri, "data:image/png;base64,aGVsbG8=");
        assert_eq!(img.content_type, "image/png");
    }

    #[test]
    fn declared_type_strips_parameters() {
        assert_eq!(
            declared_image_type(Some("image/jpeg; charset=utf-8")),
            Some("image/jpeg".to_string())
        );
        assert_eq!(
            declared_image_type(Some("IMAGE/PNG")),
            Some("image/png".to_string())
        );
    }

    #[test]
    fn declared_type_rejects_non_images() {
        assert_eq!(declared_image_type(Some("text/html")), None);
        assert_eq!(declared_image_type(None), None);
    }

    #[test]
    fn sniffing_recognises_common_formats() {
        assert_eq!(sniffed_image_type(PNG_MAGIC), "image/png");
        assert_eq!(sniffed_image_type(JPEG_MAGIC), "image/jpeg");
    }

    #[test]
    fn sniffing_defaults_to_png() {
        assert_eq!(sniffed_image_type(b"not an image at all"), "image/png");
    }

    #[tokio::test]
    async fn absent_or_blank_url_resolves_to_none() {
        let client = reqwest::Client::new();
        assert_eq!(resolve_image(&client, None, 5).await, None);
        assert_eq!(resolve_image(&client, Some("   "), 5).await, None);
    }

    #[tokio::test]
    async fn unreachable_host_resolves_to_none() {
        let client = reqwest::Client::new();
        // Reserved TLD, guaranteed not to resolve.
        let result = resolve_image(&client, Some("http://logo.invalid/logo.png"), 5).await;
        assert_eq!(result, None);
    }
}
