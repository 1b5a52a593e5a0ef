//! Wire model for the document-generation request.
//!
//! Field names match the JSON payload the historical clients already send
//! (`client_nom`, `prestations`, `total_ht`, …), so this service is a drop-in
//! replacement for them. Every textual field defaults to an empty string and
//! every numeric field to a fixed default, because the callers routinely omit
//! whatever they do not use — an absent issuer phone must render as nothing,
//! not as a validation error or a literal placeholder.
//!
//! The aggregate `total_ht` and `tva` are supplied by the caller and are
//! *not* re-derived from the line items; per-line totals are display-only.

use serde::Deserialize;

/// One render request: issuer and recipient identity, document metadata,
/// financial inputs, line items, and optional remote image references.
///
/// Immutable for the duration of one render; nothing in it survives the
/// response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentRequest {
    // ── Issuer identity ──────────────────────────────────────────────────
    #[serde(default)]
    pub user_entreprise: String,
    #[serde(default)]
    pub user_adresse: String,
    #[serde(default)]
    pub user_cp: String,
    #[serde(default)]
    pub user_ville: String,
    #[serde(default)]
    pub user_siret: String,
    #[serde(default)]
    pub user_phone: String,
    #[serde(default)]
    pub user_email: String,

    // ── Recipient identity ───────────────────────────────────────────────
    #[serde(default)]
    pub client_nom: String,
    #[serde(default)]
    pub client_adresse: String,
    #[serde(default)]
    pub client_cp: String,
    #[serde(default)]
    pub client_ville: String,

    // ── Document metadata ────────────────────────────────────────────────
    /// Free-text document type label, e.g. "DEVIS" or "FACTURE".
    pub type_document: Option<String>,
    /// Document number; absent numbers render as "PROVISOIRE".
    pub numero: Option<String>,
    /// Creation date, as sent by the caller (`2024-01-15` or full RFC 3339).
    /// Kept raw here; formatting happens at markup time so that identical
    /// payloads always produce identical markup.
    pub date_creation: Option<String>,

    // ── Financial inputs ─────────────────────────────────────────────────
    /// Caller-supplied pre-tax aggregate. Not recomputed from line items.
    #[serde(default)]
    pub total_ht: f64,
    /// Tax rate in percent.
    #[serde(default = "default_tva")]
    pub tva: f64,

    /// Line items in display order; no reordering, no deduplication.
    #[serde(default)]
    pub prestations: Vec<LineItem>,

    /// Optional terms/conditions block appended after the totals.
    pub conditions_generales: Option<String>,

    // ── Remote image references ──────────────────────────────────────────
    /// Issuer logo URL, shown in the page header when it resolves.
    pub user_logo: Option<String>,
    /// Full-page letterhead background URL. When it resolves, the document
    /// is composited over the stationery and the standard header/footer are
    /// replaced.
    pub user_papier_entete: Option<String>,
}

fn default_tva() -> f64 {
    20.0
}

/// One line of the itemized table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItem {
    /// Multi-line description: the first line is the bold heading, the
    /// remaining lines become the sub-description.
    #[serde(default)]
    pub libelle: String,
    /// Optional unit label (e.g. "m²", "h"). The unit column is rendered
    /// only when at least one item carries one.
    pub unite: Option<String>,
    #[serde(default)]
    pub quantite: f64,
    #[serde(default)]
    pub prix_unitaire: f64,
    /// Display-only line total; never validated against `quantite ×
    /// prix_unitaire`.
    #[serde(default)]
    pub total_ht: f64,
}

impl DocumentRequest {
    /// Document type label with the historical default.
    pub fn type_label(&self) -> &str {
        self.type_document.as_deref().unwrap_or("DEVIS")
    }

    /// Document number with the historical placeholder for drafts.
    pub fn numero_label(&self) -> &str {
        self.numero.as_deref().unwrap_or("PROVISOIRE")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload_uses_defaults() {
        let req: DocumentRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.total_ht, 0.0);
        assert_eq!(req.tva, 20.0);
        assert!(req.prestations.is_empty());
        assert_eq!(req.client_nom, "");
        assert_eq!(req.type_label(), "DEVIS");
        assert_eq!(req.numero_label(), "PROVISOIRE");
    }

    #[test]
    fn line_item_without_unit() {
        let item: LineItem =
            serde_json::from_str(r#"{"libelle":"Peinture","quantite":2,"prix_unitaire":150,"total_ht":300}"#)
                .unwrap();
        assert!(item.unite.is_none());
        assert_eq!(item.quantite, 2.0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: DocumentRequest =
            serde_json::from_str(r#"{"client_nom":"Dupont","une_cle_inconnue":true}"#).unwrap();
        assert_eq!(req.client_nom, "Dupont");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let req: DocumentRequest = serde_json::from_str(
            r#"{"total_ht": 1234.5, "tva": 10, "numero": "2024-042", "type_document": "FACTURE"}"#,
        )
        .unwrap();
        assert_eq!(req.total_ht, 1234.5);
        assert_eq!(req.tva, 10.0);
        assert_eq!(req.type_label(), "FACTURE");
        assert_eq!(req.numero_label(), "2024-042");
    }
}
