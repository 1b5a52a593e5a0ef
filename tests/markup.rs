//! Integration tests for the deterministic half of the pipeline: asset
//! fallback, layout selection, and markup synthesis.
//!
//! Nothing here launches the browser engine, so the whole file runs in CI.
//! URLs that must fail use the reserved `.invalid` TLD, which is guaranteed
//! never to resolve.

use devis2pdf::{build_markup, DocumentRequest, RenderConfig};

fn request_from(json: &str) -> DocumentRequest {
    serde_json::from_str(json).expect("test payload must parse")
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn markup_for(json: &str) -> String {
    build_markup(&request_from(json), &RenderConfig::default(), &client())
        .await
        .expect("markup synthesis must succeed")
}

const DUPONT: &str = r#"{
    "client_nom": "Dupont",
    "prestations": [
        {"libelle": "Peinture\nMurs et plafond",
         "quantite": 2, "prix_unitaire": 150, "total_ht": 300}
    ],
    "total_ht": 300,
    "tva": 20
}"#;

// ── The reference scenario ───────────────────────────────────────────────

#[tokio::test]
async fn dupont_scenario_contains_expected_text() {
    let html = markup_for(DUPONT).await;

    assert!(html.contains("Dupont"));
    assert!(html.contains("Peinture"));
    assert!(html.contains("Murs et plafond"));
    // Line total and unit price, French EUR formatting.
    assert!(html.contains("300,00\u{a0}€"), "missing line total");
    assert!(html.contains("150,00\u{a0}€"), "missing unit price");
    assert!(html.contains("TVA (20%)"), "missing tax label");
    assert!(html.contains("60,00\u{a0}€"), "missing tax amount");
    assert!(html.contains("360,00\u{a0}€"), "missing grand total");
    assert!(html.contains("NET À PAYER"));
}

#[tokio::test]
async fn multi_line_label_becomes_heading_and_sub_description() {
    let html = markup_for(
        r#"{"prestations": [
            {"libelle": "Peinture\nMurs et plafond\nDeux couches",
             "quantite": 1, "prix_unitaire": 100, "total_ht": 100}
        ]}"#,
    )
    .await;

    assert!(html.contains(r#"<div class="item-heading">Peinture</div>"#));
    assert!(html.contains("Murs et plafond<br>Deux couches"));
}

// ── Layout selection through the full pipeline ───────────────────────────

#[tokio::test]
async fn no_image_urls_yields_plain_layout() {
    let html = markup_for(DUPONT).await;

    // Standard repeating footer present, no full-page background, issuer
    // name as a text heading rather than an image.
    assert!(html.contains("page-footer"));
    assert!(!html.contains("letterhead-bg"));
    assert!(html.contains(r#"<h1 class="issuer-name">"#));
    assert!(!html.contains("<img"));
}

#[tokio::test]
async fn unreachable_logo_falls_back_to_text_heading() {
    let html = markup_for(
        r#"{"client_nom": "Dupont",
            "user_entreprise": "BatiPro",
            "user_logo": "http://logo.invalid/logo.png"}"#,
    )
    .await;

    assert!(html.contains(r#"<h1 class="issuer-name">BatiPro</h1>"#));
    assert!(!html.contains("<img"));
}

#[tokio::test]
async fn failed_letterhead_fetch_matches_plain_markup() {
    let with_dead_letterhead = markup_for(
        r#"{"client_nom": "Dupont",
            "user_papier_entete": "http://papeterie.invalid/fond.png",
            "total_ht": 300}"#,
    )
    .await;
    let without_letterhead =
        markup_for(r#"{"client_nom": "Dupont", "total_ht": 300}"#).await;

    assert_eq!(with_dead_letterhead, without_letterhead);
}

// ── Determinism ──────────────────────────────────────────────────────────

#[tokio::test]
async fn identical_payload_yields_byte_identical_markup() {
    let first = markup_for(DUPONT).await;
    let second = markup_for(DUPONT).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn fixed_creation_date_is_formatted_not_substituted() {
    let html = markup_for(r#"{"date_creation": "2024-01-15"}"#).await;
    assert!(html.contains("15/01/2024"));
}

// ── Degenerate payloads render, never error ──────────────────────────────

#[tokio::test]
async fn empty_payload_renders_blank_document() {
    let html = markup_for("{}").await;

    assert!(html.contains("<tbody>"));
    assert!(html.contains("0,00\u{a0}€"));
    assert!(html.contains("TVA (20%)"));
    assert!(html.contains("PROVISOIRE"));
    assert!(html.contains("DEVIS"));
    // Absent fields must render as nothing, not a stringified placeholder.
    assert!(!html.contains("undefined"));
    assert!(!html.contains("null"));
}

#[tokio::test]
async fn document_metadata_overrides_are_displayed() {
    let html = markup_for(
        r#"{"type_document": "FACTURE", "numero": "2024-042"}"#,
    )
    .await;
    assert!(html.contains("FACTURE"));
    assert!(html.contains("2024-042"));
    assert!(!html.contains("PROVISOIRE"));
}

// ── Table composition ────────────────────────────────────────────────────

#[tokio::test]
async fn unit_column_appears_only_when_a_unit_is_supplied() {
    let with_units = markup_for(
        r#"{"prestations": [
            {"libelle": "Peinture", "unite": "m²",
             "quantite": 40, "prix_unitaire": 12, "total_ht": 480}
        ]}"#,
    )
    .await;
    assert!(with_units.contains("Unité"));
    assert!(with_units.contains("m²"));

    let without_units = markup_for(DUPONT).await;
    assert!(!without_units.contains("Unité"));
}

#[tokio::test]
async fn subject_line_uses_first_item_heading() {
    let html = markup_for(DUPONT).await;
    assert!(html.contains("Objet : Peinture"));

    let empty = markup_for("{}").await;
    assert!(empty.contains("Objet : Prestation"));
}

#[tokio::test]
async fn terms_block_renders_with_line_breaks() {
    let html = markup_for(
        r#"{"conditions_generales": "Acompte de 30% à la commande\nValidité : 30 jours"}"#,
    )
    .await;
    assert!(html.contains("Conditions :"));
    assert!(html.contains("Acompte de 30% à la commande<br>Validité : 30 jours"));

    let bare = markup_for("{}").await;
    assert!(!bare.contains("Conditions :"));
}

// ── Escaping ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn payload_text_cannot_inject_markup() {
    let html = markup_for(
        r#"{"client_nom": "<script>alert('x')</script>",
            "prestations": [{"libelle": "A & B\n<b>gras</b>",
                             "quantite": 1, "prix_unitaire": 1, "total_ht": 1}]}"#,
    )
    .await;

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("A &amp; B"));
    assert!(!html.contains("<b>gras</b>"));
}
