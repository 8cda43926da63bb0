//! # Sale Draft
//!
//! Line items of a sale being composed, with the quantity clamp and
//! total recomputation rules.
//!
//! ## Line Item Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Draft Line Items                               │
//! │                                                                         │
//! │  Composer action            Draft change                                │
//! │  ───────────────            ────────────                                │
//! │                                                                         │
//! │  Pick search hit ─────────► add_line()    qty 1, price frozen at add   │
//! │                             (no-op when the product is already a line) │
//! │                                                                         │
//! │  Change quantity ─────────► set_quantity() clamped into [1, stock]     │
//! │                             (only the ≥1 floor when stock is unknown)  │
//! │                                                                         │
//! │  Remove line ─────────────► remove_line() exactly one line, by id      │
//! │                                                                         │
//! │  Displayed total ─────────► Σ quantity × unit price, recomputed on     │
//! │                             every mutation, NEVER cached separately     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::{json, Value};

use crate::edit::RecordForm;
use crate::error::{CoreError, CoreResult};
use crate::types::{ProduitHit, RecordId};

// =============================================================================
// Sale Line
// =============================================================================

/// One product line inside a draft.
///
/// `prix_vente` is frozen from the search hit at add time: repricing a
/// product mid-composition must not silently change the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    pub produit_id: RecordId,
    pub designation: String,
    pub prix_vente: f64,
    pub quantite: i64,
    /// Known pharmacy stock for this product, the clamp ceiling.
    pub stock_pharma: Option<i64>,
}

impl SaleLine {
    fn from_hit(hit: &ProduitHit) -> Self {
        SaleLine {
            produit_id: hit.id,
            designation: hit.designation.clone(),
            prix_vente: hit.pv.unwrap_or(0.0),
            quantite: 1,
            stock_pharma: hit.stock_pharma,
        }
    }

    /// Effective line total, always `quantite × prix_vente`.
    pub fn total(&self) -> f64 {
        self.quantite as f64 * self.prix_vente
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// The working copy of a new sale.
#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    /// Free-text customer name.
    pub client: String,
    /// Locally generated invoice number.
    pub numero: String,
    lines: Vec<SaleLine>,
}

impl SaleDraft {
    pub fn new(numero: impl Into<String>) -> Self {
        SaleDraft {
            client: String::new(),
            numero: numero.into(),
            lines: Vec::new(),
        }
    }

    /// Adds a product as a new line with quantity 1.
    ///
    /// Returns `false` (and changes nothing) when the product already
    /// has a line - a sale never carries duplicate lines.
    pub fn add_line(&mut self, hit: &ProduitHit) -> bool {
        if self.lines.iter().any(|l| l.produit_id == hit.id) {
            return false;
        }
        self.lines.push(SaleLine::from_hit(hit));
        true
    }

    /// Removes exactly one line by product id.
    pub fn remove_line(&mut self, produit_id: RecordId) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.produit_id != produit_id);
        if self.lines.len() == before {
            return Err(CoreError::LineNotFound(produit_id));
        }
        Ok(())
    }

    /// Sets a line's quantity, clamped into `[1, stock]` when the
    /// pharmacy stock is known and `[1, ∞)` otherwise. Returns the
    /// quantity actually stored.
    pub fn set_quantity(&mut self, produit_id: RecordId, quantity: i64) -> CoreResult<i64> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.produit_id == produit_id)
            .ok_or(CoreError::LineNotFound(produit_id))?;

        let mut clamped = quantity.max(1);
        if let Some(stock) = line.stock_pharma {
            clamped = clamped.min(stock.max(1));
        }
        line.quantite = clamped;
        Ok(clamped)
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The displayed total: Σ quantity × unit price over all lines,
    /// recomputed on every call.
    pub fn total_ht(&self) -> f64 {
        self.lines.iter().map(SaleLine::total).sum()
    }
}

impl RecordForm for SaleDraft {
    /// Shapes the `POST /api/ventes` payload.
    ///
    /// Canonical per-line shape: `produit_id` / `qte` / `prix_vente`.
    /// Sales are create-only in this console, so `id` is normally
    /// absent; the id rule is honoured regardless.
    fn write_payload(&self, id: Option<RecordId>) -> Value {
        let produits: Vec<Value> = self
            .lines
            .iter()
            .map(|l| {
                json!({
                    "produit_id": l.produit_id,
                    "qte": l.quantite,
                    "prix_vente": l.prix_vente,
                })
            })
            .collect();

        let mut payload = json!({
            "client": self.client,
            "numero": self.numero,
            "montant_ht": self.total_ht(),
            "produits": produits,
        });

        if let Some(id) = id {
            payload["id"] = json!(id.to_string());
        }
        payload
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: RecordId, pv: f64, stock: Option<i64>) -> ProduitHit {
        ProduitHit {
            id,
            designation: format!("Produit {}", id),
            code: None,
            pv: Some(pv),
            qte: None,
            stock_pharma: stock,
            famille: None,
        }
    }

    #[test]
    fn test_add_line_defaults_quantity_to_one() {
        let mut draft = SaleDraft::new("F-0001");
        assert!(draft.add_line(&hit(1, 250.0, Some(10))));
        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.lines()[0].quantite, 1);
        assert_eq!(draft.lines()[0].prix_vente, 250.0);
    }

    #[test]
    fn test_duplicate_line_is_a_no_op() {
        let mut draft = SaleDraft::new("F-0001");
        draft.add_line(&hit(1, 250.0, Some(10)));
        assert!(!draft.add_line(&hit(1, 300.0, Some(10))));
        assert_eq!(draft.lines().len(), 1);
        // The original frozen price is untouched.
        assert_eq!(draft.lines()[0].prix_vente, 250.0);
    }

    #[test]
    fn test_remove_line_exactly_one() {
        let mut draft = SaleDraft::new("F-0001");
        draft.add_line(&hit(1, 100.0, None));
        draft.add_line(&hit(2, 200.0, None));

        draft.remove_line(1).unwrap();
        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.lines()[0].produit_id, 2);

        assert_eq!(draft.remove_line(1), Err(CoreError::LineNotFound(1)));
    }

    #[test]
    fn test_quantity_clamped_to_known_stock() {
        let mut draft = SaleDraft::new("F-0001");
        draft.add_line(&hit(1, 100.0, Some(8)));

        assert_eq!(draft.set_quantity(1, 5).unwrap(), 5);
        assert_eq!(draft.set_quantity(1, 0).unwrap(), 1);
        assert_eq!(draft.set_quantity(1, -3).unwrap(), 1);
        assert_eq!(draft.set_quantity(1, 99).unwrap(), 8);
    }

    #[test]
    fn test_quantity_floor_only_without_stock() {
        let mut draft = SaleDraft::new("F-0001");
        draft.add_line(&hit(1, 100.0, None));

        assert_eq!(draft.set_quantity(1, 0).unwrap(), 1);
        assert_eq!(draft.set_quantity(1, 5000).unwrap(), 5000);
    }

    #[test]
    fn test_total_recomputed_after_every_mutation() {
        let mut draft = SaleDraft::new("F-0001");
        draft.add_line(&hit(1, 100.0, Some(10)));
        draft.add_line(&hit(2, 50.0, Some(10)));

        draft.set_quantity(1, 2).unwrap();
        assert_eq!(draft.total_ht(), 250.0);

        draft.set_quantity(2, 3).unwrap();
        assert_eq!(draft.total_ht(), 350.0);

        draft.remove_line(2).unwrap();
        assert_eq!(draft.total_ht(), 200.0);
    }

    #[test]
    fn test_write_payload_shape() {
        let mut draft = SaleDraft::new("1234567890123");
        draft.client = "Mme Diallo".to_string();
        draft.add_line(&hit(4, 250.0, Some(10)));
        draft.set_quantity(4, 2).unwrap();

        let payload = draft.write_payload(None);
        assert!(payload.get("id").is_none());
        assert_eq!(payload["numero"], "1234567890123");
        assert_eq!(payload["client"], "Mme Diallo");
        assert_eq!(payload["montant_ht"], 500.0);
        assert_eq!(payload["produits"][0]["produit_id"], 4);
        assert_eq!(payload["produits"][0]["qte"], 2);
        assert_eq!(payload["produits"][0]["prix_vente"], 250.0);
    }
}
