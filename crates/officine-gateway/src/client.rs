//! # Remote Gateway Client
//!
//! The typed surface over the backend: GraphQL queries on the read
//! path, flat REST payloads on the write path, with the session token
//! attached to both.
//!
//! ## Read Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Read Path Queries                                 │
//! │                                                                         │
//! │  produits_page(p, n) ── produitspaginated(count:n, page:p)             │
//! │  produit_detail(id) ─── produits(id:) → first element, else NotFound   │
//! │  recherche_produits ─── produits(search:)                              │
//! │  familles() ─────────── familles                                       │
//! │  me() ───────────────── me                                             │
//! │  ventes_page(p, n) ──── ventespaginated(count:n, page:p)               │
//! │  vente_detail(id) ───── ventes(id:) → first element, else NotFound     │
//! │                                                                         │
//! │  Lists select the summary projection only; the detail queries          │
//! │  select every editable field (the edit modal needs them all).           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use officine_core::{
    Famille, ListPage, ProduitDetail, ProduitHit, ProduitRow, RecordId, UserInfo, VenteDetail,
    VenteRow,
};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::graphql::{GraphqlResponse, PaginatedBlock};
use crate::session::SessionStore;

/// The Remote Data Gateway.
///
/// One instance per running shell; controllers share it behind an
/// `Arc`. All state lives in the [`SessionStore`], so the gateway
/// itself is plain request plumbing.
#[derive(Debug, Clone)]
pub struct RemoteGateway {
    http: Client,
    config: GatewayConfig,
    session: SessionStore,
}

impl RemoteGateway {
    /// Builds a gateway with its own connection pool.
    pub fn new(config: GatewayConfig, session: SessionStore) -> GatewayResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(RemoteGateway {
            http,
            config,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchanges credentials for a bearer token and stores it.
    ///
    /// The backend answers 200 or 201 with the token under `token` or
    /// `access_token` depending on the deployment; both are accepted,
    /// and a success without any token is still a login failure.
    pub async fn login(&self, email: &str, password: &str) -> GatewayResult<()> {
        debug!(email = %email, "Logging in");

        let response = self
            .http
            .post(self.config.rest_url("login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !write_success(status) {
            return Err(GatewayError::Login {
                message: server_message(&body)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }

        let token = extract_token(&body).ok_or_else(|| GatewayError::Login {
            message: "no token in response".to_string(),
        })?;

        self.session.save_token(token).await;
        Ok(())
    }

    /// The authenticated user, for the shell header and sale forms.
    pub async fn me(&self) -> GatewayResult<UserInfo> {
        #[derive(Deserialize)]
        struct Data {
            me: UserInfo,
        }
        let data: Data = self.query("{ me { id name email } }".to_string()).await?;
        Ok(data.me)
    }

    // =========================================================================
    // Products - read path
    // =========================================================================

    /// One page of the product catalog (summary projection).
    pub async fn produits_page(
        &self,
        page: u32,
        count: u32,
    ) -> GatewayResult<ListPage<ProduitRow>> {
        #[derive(Deserialize)]
        struct Data {
            produitspaginated: PaginatedBlock<ProduitRow>,
        }

        let query = format!(
            "{{ produitspaginated(count:{count},page:{page}){{ \
               metadata{{ current_page per_page total }} \
               data{{ id code designation stock_pharma stock_magasin pa pv \
                 famille{{ nom }} }} }} }}"
        );

        let data: Data = self.query(query).await?;
        Ok(data.produitspaginated.into_list_page())
    }

    /// Every editable field of one product, for the edit modal.
    pub async fn produit_detail(&self, id: RecordId) -> GatewayResult<ProduitDetail> {
        #[derive(Deserialize)]
        struct Data {
            produits: Vec<ProduitDetail>,
        }

        let query = format!(
            "{{ produits(id: {id}) {{ id image code designation description qte pa pv \
               stock_pharma stock_magasin stock_initial_pharma stock_initial_magasin \
               limite famille_id famille {{ id nom }} }} }}"
        );

        let data: Data = self.query(query).await?;
        // The backend answers the by-id query with a list.
        data.produits
            .into_iter()
            .next()
            .ok_or(GatewayError::NotFound {
                entity: "produit",
                id,
            })
    }

    /// Products matching a search term, for the sale composer.
    pub async fn recherche_produits(&self, term: &str) -> GatewayResult<Vec<ProduitHit>> {
        #[derive(Deserialize)]
        struct Data {
            produits: Vec<ProduitHit>,
        }

        let query = format!(
            "{{ produits(search: \"{}\") {{ designation code pv id qte stock_pharma \
               famille {{ nom }} }} }}",
            escape_term(term)
        );

        let data: Data = self.query(query).await?;
        Ok(data.produits)
    }

    /// All product families, for the edit modal's selector.
    pub async fn familles(&self) -> GatewayResult<Vec<Famille>> {
        #[derive(Deserialize)]
        struct Data {
            familles: Vec<Famille>,
        }
        let data: Data = self.query("{ familles { id nom } }".to_string()).await?;
        Ok(data.familles)
    }

    // =========================================================================
    // Ventes - read path
    // =========================================================================

    /// One page of the sales ledger (summary projection).
    pub async fn ventes_page(&self, page: u32, count: u32) -> GatewayResult<ListPage<VenteRow>> {
        #[derive(Deserialize)]
        struct Data {
            ventespaginated: PaginatedBlock<VenteRow>,
        }

        let query = format!(
            "{{ ventespaginated(count:{count},page:{page}){{ \
               metadata{{ current_page per_page total }} \
               data{{ id statut nom_complet paye client{{ nom_complet }} numero \
                 montant_ht montant_ttc remise_total montant_avec_remise created_at \
                 vente_produits{{ qte remise montant_remise total produit{{ designation }} }} \
                 montant qte user {{ id name }} }} }} }}"
        );

        let data: Data = self.query(query).await?;
        Ok(data.ventespaginated.into_list_page())
    }

    /// Full projection of one sale, for the detail modal.
    pub async fn vente_detail(&self, id: RecordId) -> GatewayResult<VenteDetail> {
        #[derive(Deserialize)]
        struct Data {
            ventes: Vec<VenteDetail>,
        }

        let query = format!(
            "{{ ventes(id: {id}) {{ id created_at montant_ht montant_ttc remise_total \
               montant_avec_remise user {{ id name }} \
               vente_produits {{ qte remise montant_remise total produit {{ designation }} }} }} }}"
        );

        let data: Data = self.query(query).await?;
        data.ventes.into_iter().next().ok_or(GatewayError::NotFound {
            entity: "vente",
            id,
        })
    }

    // =========================================================================
    // Write path
    // =========================================================================

    /// Creates or updates a product (`id` present in the payload means
    /// update; see `ProductForm::write_payload`).
    pub async fn save_produit(&self, payload: &Value) -> GatewayResult<()> {
        self.write("produits", payload).await
    }

    /// Persists a composed sale.
    pub async fn create_vente(&self, payload: &Value) -> GatewayResult<()> {
        self.write("ventes", payload).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Runs one GraphQL query and unwraps the envelope.
    async fn query<T: DeserializeOwned>(&self, query: String) -> GatewayResult<T> {
        debug!(endpoint = %self.config.graphql_url(), "GraphQL query");

        let mut request = self
            .http
            .get(self.config.graphql_url())
            .query(&[("query", query.as_str())]);

        if let Some(bearer) = self.session.bearer().await {
            request = request.header(AUTHORIZATION, bearer);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthenticated);
        }

        let envelope: GraphqlResponse<T> = response.json().await?;
        envelope.into_result()
    }

    /// Posts one flat write payload; 200/201 is success, anything else
    /// surfaces the server message.
    async fn write(&self, resource: &str, payload: &Value) -> GatewayResult<()> {
        let bearer = self
            .session
            .bearer()
            .await
            .ok_or(GatewayError::Unauthenticated)?;

        debug!(resource = %resource, "REST write");

        let response = self
            .http
            .post(self.config.rest_url(resource))
            .header(AUTHORIZATION, bearer)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if write_success(status) {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthenticated);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message =
            server_message(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        warn!(resource = %resource, status = status.as_u16(), message = %message, "Write rejected");

        Err(GatewayError::Write {
            status: status.as_u16(),
            message,
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// The write path treats "ok" and "created" as success.
fn write_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

/// Pulls the token out of a login response body, wherever this
/// deployment put it.
fn extract_token(body: &Value) -> Option<String> {
    body.get("token")
        .or_else(|| body.get("access_token"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// The server-supplied message of an error body, when there is one.
fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Escapes a user-typed search term for inline inclusion in a query.
fn escape_term(term: &str) -> String {
    term.replace('\\', "\\\\").replace('"', "\\\"")
}

// =============================================================================
// Unit Tests
// =============================================================================
