//! # Product Working Copy
//!
//! The editable field set of the product modal and its REST payload.
//!
//! ## Coercion, Not Validation
//! The server is authoritative for business validation. This form only
//! coerces: a blank or unparsable numeric input becomes 0, unknown
//! field names are ignored. That leniency is deliberate (the backend
//! round-trips zeroed fields without complaint) and must be preserved.

use serde_json::{json, Value};

use crate::edit::RecordForm;
use crate::types::{ProduitDetail, RecordId};

/// Working copy of a product being created or edited.
///
/// Defaults to the empty form used by the "new product" action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub code: String,
    pub designation: String,
    pub description: String,
    pub image: String,
    pub pa: f64,
    pub pv: f64,
    pub qte: i64,
    pub stock_pharma: i64,
    pub stock_magasin: i64,
    pub stock_initial_pharma: i64,
    pub stock_initial_magasin: i64,
    pub limite: i64,
    /// Family selector value; empty until one is chosen.
    pub famille_id: String,
}

impl ProductForm {
    /// Merges one field edit into the working copy.
    ///
    /// Numeric fields coerce through parse-or-zero; unknown names are
    /// dropped silently.
    pub fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "code" => self.code = value.to_string(),
            "designation" => self.designation = value.to_string(),
            "description" => self.description = value.to_string(),
            "image" => self.image = value.to_string(),
            "famille_id" => self.famille_id = value.to_string(),
            "pa" => self.pa = coerce_decimal(value),
            "pv" => self.pv = coerce_decimal(value),
            "qte" => self.qte = coerce_integer(value),
            "stock_pharma" => self.stock_pharma = coerce_integer(value),
            "stock_magasin" => self.stock_magasin = coerce_integer(value),
            "stock_initial_pharma" => self.stock_initial_pharma = coerce_integer(value),
            "stock_initial_magasin" => self.stock_initial_magasin = coerce_integer(value),
            "limite" => self.limite = coerce_integer(value),
            _ => {}
        }
    }
}

impl From<&ProduitDetail> for ProductForm {
    /// Hydrates the form from the server-fetched detail projection,
    /// zeroing anything the backend left out.
    fn from(detail: &ProduitDetail) -> Self {
        ProductForm {
            code: detail.code.clone().unwrap_or_default(),
            designation: detail.designation.clone().unwrap_or_default(),
            description: detail.description.clone().unwrap_or_default(),
            image: detail.image.clone().unwrap_or_default(),
            pa: detail.pa.unwrap_or(0.0),
            pv: detail.pv.unwrap_or(0.0),
            qte: detail.qte.unwrap_or(0),
            stock_pharma: detail.stock_pharma.unwrap_or(0),
            stock_magasin: detail.stock_magasin.unwrap_or(0),
            stock_initial_pharma: detail.stock_initial_pharma.unwrap_or(0),
            stock_initial_magasin: detail.stock_initial_magasin.unwrap_or(0),
            limite: detail.limite.unwrap_or(0),
            famille_id: detail
                .famille_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

impl RecordForm for ProductForm {
    /// Shapes the `POST /api/produits` payload.
    ///
    /// The write API expects every value as a string; an empty code is
    /// sent as the literal string "null" (backend convention).
    fn write_payload(&self, id: Option<RecordId>) -> Value {
        let code = if self.code.is_empty() {
            "null".to_string()
        } else {
            self.code.clone()
        };

        let mut payload = json!({
            "pa": decimal_string(self.pa),
            "code": code,
            "designation": self.designation,
            "qte": self.qte.to_string(),
            "pv": decimal_string(self.pv),
            "famille_id": self.famille_id,
        });

        if let Some(id) = id {
            payload["id"] = json!(id.to_string());
        }
        payload
    }
}

// =============================================================================
// Coercion Helpers
// =============================================================================

fn coerce_decimal(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

fn coerce_integer(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Renders a decimal the way the write API expects: no trailing `.0`
/// on whole values ("1500", not "1500.0"), fraction kept otherwise.
fn decimal_string(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_field_coerces_numerics() {
        let mut form = ProductForm::default();
        form.set_field("pa", "1500");
        form.set_field("pv", "1750.5");
        form.set_field("qte", "12");
        assert_eq!(form.pa, 1500.0);
        assert_eq!(form.pv, 1750.5);
        assert_eq!(form.qte, 12);

        // Blank and garbage inputs coerce to zero, never error.
        form.set_field("pa", "");
        form.set_field("qte", "douze");
        assert_eq!(form.pa, 0.0);
        assert_eq!(form.qte, 0);
    }

    #[test]
    fn test_set_field_ignores_unknown_names() {
        let mut form = ProductForm::default();
        let before = form.clone();
        form.set_field("couleur", "bleu");
        assert_eq!(form, before);
    }

    #[test]
    fn test_hydration_zeroes_missing_fields() {
        let detail = ProduitDetail {
            id: 3,
            designation: Some("Paracétamol 1g".to_string()),
            pv: Some(250.0),
            famille_id: Some(2),
            ..ProduitDetail::default()
        };
        let form = ProductForm::from(&detail);
        assert_eq!(form.designation, "Paracétamol 1g");
        assert_eq!(form.pv, 250.0);
        assert_eq!(form.pa, 0.0);
        assert_eq!(form.stock_pharma, 0);
        assert_eq!(form.famille_id, "2");
    }

    #[test]
    fn test_create_payload_shape() {
        let mut form = ProductForm::default();
        form.set_field("designation", "Amoxicilline 500mg");
        form.set_field("pa", "1200");
        form.set_field("pv", "1850.5");
        form.set_field("qte", "30");
        form.set_field("famille_id", "4");

        let payload = form.write_payload(None);
        assert_eq!(
            payload,
            json!({
                "pa": "1200",
                "code": "null",
                "designation": "Amoxicilline 500mg",
                "qte": "30",
                "pv": "1850.5",
                "famille_id": "4",
            })
        );
    }

    #[test]
    fn test_update_payload_includes_id() {
        let mut form = ProductForm::default();
        form.set_field("code", "AMOX500");
        let payload = form.write_payload(Some(17));
        assert_eq!(payload["id"], json!("17"));
        assert_eq!(payload["code"], json!("AMOX500"));
    }
}
