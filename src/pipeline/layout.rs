//! Layout selection: map the resolved assets to one of three page layouts.
//!
//! The mode is a pure function of which images actually resolved, decided
//! once per request and then pattern-matched by the markup synthesizer.
//! Centralising the decision here keeps the conditional markup in one place
//! instead of scattering string concatenation through the templates.
//!
//! A letterhead that was *requested* but failed to fetch must not fail the
//! render: selection only ever sees resolved assets, so the fallback to
//! [`LayoutMode::LogoHeader`] or [`LayoutMode::Plain`] is automatic.

use super::assets::InlineImage;

/// How the page header, footer, and background are composed.
///
/// The three modes are mutually exclusive and terminal for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutMode {
    /// No image resolved: issuer name as a text heading, standard repeating
    /// header band and contact-line footer.
    Plain,
    /// A logo resolved: same composition as `Plain` with the logo image in
    /// place of the issuer-name heading.
    LogoHeader { logo: InlineImage },
    /// A letterhead resolved: the image becomes a full-bleed background on
    /// every page, the document metadata moves into a small overlay box near
    /// the top-right, and the standard footer is suppressed because the
    /// stationery carries the issuer's own legal footer.
    Letterhead { background: InlineImage },
}

impl LayoutMode {
    /// Select the layout from the resolved (not merely requested) assets.
    ///
    /// Letterhead wins over logo when both resolved; absence of both yields
    /// `Plain`.
    pub fn select(logo: Option<InlineImage>, letterhead: Option<InlineImage>) -> Self {
        match (logo, letterhead) {
            (_, Some(background)) => LayoutMode::Letterhead { background },
            (Some(logo), None) => LayoutMode::LogoHeader { logo },
            (None, None) => LayoutMode::Plain,
        }
    }

    /// Stable name used by the markup template to branch.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutMode::Plain => "plain",
            LayoutMode::LogoHeader { .. } => "logo",
            LayoutMode::Letterhead { .. } => "letterhead",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(uri: &str) -> InlineImage {
        let content_type = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or("image/png")
            .to_string();
        InlineImage {
            data_uri: uri.to_string(),
            content_type,
        }
    }

    #[test]
    fn no_assets_selects_plain() {
        assert_eq!(LayoutMode::select(None, None), LayoutMode::Plain);
    }

    #[test]
    fn logo_alone_selects_logo_header() {
        let mode = LayoutMode::select(Some(img("data:image/png;base64,AAAA")), None);
        assert!(matches!(mode, LayoutMode::LogoHeader { .. }));
    }

    #[test]
    fn letterhead_wins_over_logo() {
        let mode = LayoutMode::select(
            Some(img("data:image/png;base64,AAAA")),
            Some(img("data:image/jpeg;base64,BBBB")),
        );
        match mode {
            LayoutMode::Letterhead { background } => {
                assert_eq!(background.content_type, "image/jpeg");
                assert!(background.data_uri.contains("BBBB"));
            }
            other => panic!("expected Letterhead, got {other:?}"),
        }
    }

    #[test]
    fn failed_letterhead_fetch_falls_back() {
        // A letterhead URL whose fetch failed reaches selection as None and
        // must degrade rather than error.
        let mode = LayoutMode::select(Some(img("data:image/png;base64,AAAA")), None);
        assert!(matches!(mode, LayoutMode::LogoHeader { .. }));
        assert_eq!(LayoutMode::select(None, None), LayoutMode::Plain);
    }
}
