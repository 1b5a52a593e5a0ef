//! Markup synthesis: assemble the self-contained HTML document.
//!
//! All branching and formatting happens here, in Rust, by building a fully
//! pre-formatted view model; the Tera template only lays values out. That
//! split keeps the layout logic unit-testable without parsing HTML, and it
//! makes the markup a pure function of the request — identical payloads
//! yield byte-identical markup, which downstream golden comparisons rely
//! on.
//!
//! The template is embedded at compile time and parsed once per process.
//! Tera auto-escapes every interpolated value (the template name ends in
//! `.html`), so payload text cannot break out of the markup; base64 data
//! URIs survive escaping untouched.

use crate::config::RenderConfig;
use crate::model::{DocumentRequest, LineItem};
use crate::pipeline::layout::LayoutMode;
use crate::pipeline::totals::{self, Totals};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(
        "document.html",
        include_str!("../../templates/document.html"),
    )
    .expect("embedded document template must parse");
    tera
});

/// Render the complete markup document for one request.
pub fn render_document(
    req: &DocumentRequest,
    mode: &LayoutMode,
    config: &RenderConfig,
) -> Result<String, tera::Error> {
    let totals = totals::compute_totals(req.total_ht, req.tva);
    let view = build_view(req, mode, &totals, config);
    let context = Context::from_serialize(&view)?;
    TEMPLATES.render("document.html", &context)
}

// ── View model ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct DocumentView {
    mode: &'static str,
    logo: Option<String>,
    letterhead: Option<String>,

    issuer: PartyView,
    /// Issuer heading shown when no logo resolved; falls back to a generic
    /// label so the header never renders an empty `<h1>`.
    issuer_heading: String,
    client: PartyView,

    doc_label: String,
    doc_number: String,
    doc_date: String,
    subject: String,

    show_units: bool,
    items: Vec<ItemView>,

    pretax: String,
    tax_rate: String,
    tax_amount: String,
    grand_total: String,

    terms: Vec<String>,

    margin_top_mm: f64,
    margin_bottom_mm: f64,
    margin_side_mm: f64,
}

#[derive(Debug, Serialize)]
struct PartyView {
    name: String,
    address: String,
    postal_code: String,
    city: String,
    tax_id: String,
    phone: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct ItemView {
    heading: String,
    details: Vec<String>,
    unit: String,
    quantity: String,
    unit_price: String,
    line_total: String,
}

fn build_view(
    req: &DocumentRequest,
    mode: &LayoutMode,
    totals: &Totals,
    config: &RenderConfig,
) -> DocumentView {
    let (logo, letterhead) = match mode {
        LayoutMode::Plain => (None, None),
        LayoutMode::LogoHeader { logo } => (Some(logo.data_uri.clone()), None),
        LayoutMode::Letterhead { background } => (None, Some(background.data_uri.clone())),
    };

    let issuer_heading = if req.user_entreprise.is_empty() {
        "Mon Entreprise".to_string()
    } else {
        req.user_entreprise.clone()
    };

    let subject = req
        .prestations
        .first()
        .map(|item| split_label(&item.libelle).0)
        .filter(|heading| !heading.is_empty())
        .unwrap_or_else(|| "Prestation".to_string());

    let show_units = req
        .prestations
        .iter()
        .any(|item| item.unite.as_deref().is_some_and(|u| !u.is_empty()));

    DocumentView {
        mode: mode.name(),
        logo,
        letterhead,
        issuer: PartyView {
            name: req.user_entreprise.clone(),
            address: req.user_adresse.clone(),
            postal_code: req.user_cp.clone(),
            city: req.user_ville.clone(),
            tax_id: req.user_siret.clone(),
            phone: req.user_phone.clone(),
            email: req.user_email.clone(),
        },
        issuer_heading,
        client: PartyView {
            name: req.client_nom.clone(),
            address: req.client_adresse.clone(),
            postal_code: req.client_cp.clone(),
            city: req.client_ville.clone(),
            tax_id: String::new(),
            phone: String::new(),
            email: String::new(),
        },
        doc_label: req.type_label().to_string(),
        doc_number: req.numero_label().to_string(),
        doc_date: format_date(req.date_creation.as_deref()),
        subject,
        show_units,
        items: req.prestations.iter().map(|i| item_view(i, show_units)).collect(),
        pretax: totals::format_eur(totals.pretax),
        tax_rate: totals::format_rate(totals.rate),
        tax_amount: totals::format_eur(totals.tax_amount),
        grand_total: totals::format_eur(totals.grand_total),
        terms: req
            .conditions_generales
            .as_deref()
            .map(split_lines)
            .unwrap_or_default(),
        margin_top_mm: config.margin_top_mm,
        margin_bottom_mm: config.margin_bottom_mm,
        margin_side_mm: config.margin_side_mm,
    }
}

fn item_view(item: &LineItem, show_units: bool) -> ItemView {
    let (heading, details) = split_label(&item.libelle);
    ItemView {
        heading,
        details,
        unit: if show_units {
            item.unite.clone().unwrap_or_default()
        } else {
            String::new()
        },
        quantity: format_quantity(item.quantite),
        unit_price: totals::format_eur(item.prix_unitaire),
        line_total: totals::format_eur(item.total_ht),
    }
}

// ── Formatting helpers ───────────────────────────────────────────────────

/// Split a multi-line label into its bold heading (first line) and the
/// sub-description lines shown underneath it.
fn split_label(label: &str) -> (String, Vec<String>) {
    let mut lines = label.lines();
    let heading = lines.next().unwrap_or("").to_string();
    (heading, lines.map(str::to_string).collect())
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Display a quantity the way the payload wrote it: whole numbers without a
/// fraction, everything else as-is.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{quantity}")
    }
}

/// Format a caller-supplied creation date as `DD/MM/YYYY`.
///
/// Accepts a plain date (`2024-01-15`), an RFC 3339 timestamp, or a naive
/// timestamp; anything else is passed through verbatim and an absent date
/// renders as nothing. The request time is never substituted — markup must
/// stay a pure function of the payload.
fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%d/%m/%Y").to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}
