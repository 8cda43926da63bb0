//! # Wire DTOs
//!
//! Record shapes as the backend serves them. Field names are the
//! GraphQL schema's (French, snake_case) and must match the wire byte
//! for byte - the console owns no storage, so these types ARE the data
//! model.
//!
//! ## Projection Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Summary vs Detail Projections                        │
//! │                                                                         │
//! │  List screen                       Edit modal                           │
//! │  ───────────                       ──────────                           │
//! │                                                                         │
//! │  produitspaginated ──► ProduitRow  produits(id:) ──► ProduitDetail     │
//! │    (table columns only)              (every editable field)             │
//! │                                                                         │
//! │  ventespaginated ────► VenteRow    ventes(id:) ────► VenteDetail       │
//! │                                                                         │
//! │  The list only carries a summary projection; opening an edit session   │
//! │  for an existing record therefore REQUIRES a detail fetch first.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Leniency
//! Almost every field is `Option` with a serde default: the backend
//! omits nulls freely and a missing numeric is rendered as 0 rather
//! than rejected. That leniency is deliberate and load-bearing.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Backend-assigned opaque record identifier.
///
/// Present only after persistence; a working copy for a new record has
/// no id at all (see [`crate::edit::EditSession`]).
pub type RecordId = i64;

// =============================================================================
// List Page
// =============================================================================

/// One page of a paginated collection, as returned by the read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Records on this page, in server order.
    pub items: Vec<T>,
    /// 1-based page index echoed by the server.
    pub current_page: u32,
    /// Window size this page was fetched with.
    pub per_page: u32,
    /// Total records across all pages.
    pub total: u64,
}

impl<T> ListPage<T> {
    /// Derived page count, never less than 1 (see [`crate::total_pages`]).
    pub fn total_pages(&self) -> u32 {
        crate::pagination::total_pages(self.total, self.per_page)
    }
}

// =============================================================================
// Familles (product families)
// =============================================================================

/// A product family.
///
/// List rows select only `nom`; the edit modal's selector also needs
/// `id`, hence the default.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Famille {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub nom: String,
}

// =============================================================================
// Products
// =============================================================================

/// Summary projection of a product, one table row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProduitRow {
    pub id: RecordId,
    #[serde(default)]
    pub code: Option<String>,
    pub designation: String,
    #[serde(default)]
    pub stock_pharma: Option<i64>,
    #[serde(default)]
    pub stock_magasin: Option<i64>,
    /// Purchase price (prix d'achat), decimal XOF.
    #[serde(default)]
    pub pa: Option<f64>,
    /// Selling price (prix de vente), decimal XOF.
    #[serde(default)]
    pub pv: Option<f64>,
    #[serde(default)]
    pub famille: Option<Famille>,
}

/// Full projection of a product, fetched when an edit session opens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProduitDetail {
    pub id: RecordId,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub qte: Option<i64>,
    #[serde(default)]
    pub pa: Option<f64>,
    #[serde(default)]
    pub pv: Option<f64>,
    #[serde(default)]
    pub stock_pharma: Option<i64>,
    #[serde(default)]
    pub stock_magasin: Option<i64>,
    #[serde(default)]
    pub stock_initial_pharma: Option<i64>,
    #[serde(default)]
    pub stock_initial_magasin: Option<i64>,
    #[serde(default)]
    pub limite: Option<i64>,
    #[serde(default)]
    pub famille_id: Option<RecordId>,
    #[serde(default)]
    pub famille: Option<Famille>,
}

/// A product as returned by the search query of the sale composer.
///
/// Carries the pharmacy stock so the composer can clamp quantities.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProduitHit {
    pub id: RecordId,
    pub designation: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub pv: Option<f64>,
    #[serde(default)]
    pub qte: Option<i64>,
    /// Known pharmacy stock; `None` means no upper clamp beyond 1.
    #[serde(default)]
    pub stock_pharma: Option<i64>,
    #[serde(default)]
    pub famille: Option<Famille>,
}

// =============================================================================
// Users
// =============================================================================

/// The authenticated user, from the `me` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserInfo {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Ventes (sales)
// =============================================================================

/// Reference to a customer inside a sale row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientRef {
    #[serde(default)]
    pub nom_complet: Option<String>,
}

/// Reference to a product inside a sale line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProduitRef {
    pub designation: String,
}

/// One line item of a persisted sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VenteLigne {
    #[serde(default)]
    pub qte: Option<i64>,
    #[serde(default)]
    pub remise: Option<f64>,
    #[serde(default)]
    pub montant_remise: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub produit: Option<ProduitRef>,
}

/// Summary projection of a sale, one ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VenteRow {
    pub id: RecordId,
    #[serde(default)]
    pub statut: Option<String>,
    #[serde(default)]
    pub nom_complet: Option<String>,
    #[serde(default)]
    pub paye: Option<bool>,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub montant_ht: Option<f64>,
    #[serde(default)]
    pub montant_ttc: Option<f64>,
    #[serde(default)]
    pub remise_total: Option<f64>,
    #[serde(default)]
    pub montant_avec_remise: Option<f64>,
    /// Backend timestamp, kept verbatim; see [`parse_backend_timestamp`].
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub vente_produits: Vec<VenteLigne>,
    #[serde(default)]
    pub montant: Option<f64>,
    #[serde(default)]
    pub qte: Option<i64>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

impl VenteRow {
    /// The amount shown in the "Total" column: the discounted amount
    /// when present, the TTC amount otherwise.
    pub fn montant_affiche(&self) -> Option<f64> {
        self.montant_avec_remise.or(self.montant_ttc)
    }

    /// Whether the sale is paid; an absent flag reads as unpaid.
    pub fn est_paye(&self) -> bool {
        self.paye.unwrap_or(false)
    }

    /// Creation timestamp parsed into chrono, when the backend value
    /// can be read at all.
    pub fn date_creation(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_backend_timestamp)
    }
}

/// Full projection of a sale, fetched for the detail modal.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VenteDetail {
    pub id: RecordId,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub montant_ht: Option<f64>,
    #[serde(default)]
    pub montant_ttc: Option<f64>,
    #[serde(default)]
    pub remise_total: Option<f64>,
    #[serde(default)]
    pub montant_avec_remise: Option<f64>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub vente_produits: Vec<VenteLigne>,
}

// =============================================================================
// Timestamp Parsing
// =============================================================================

/// Parses a backend timestamp.
///
/// The API mixes RFC 3339 (`2024-03-01T09:30:00Z`) and the plain
/// `Y-m-d H:M:S` form depending on the resolver, so both are accepted.
pub fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Unit Tests
// =============================================================================
