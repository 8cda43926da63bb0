//! # Record Sources
//!
//! The seam between a list controller and the gateway. A source knows
//! how to fetch one page of one collection; the controller neither
//! knows nor cares which query backs it, which is also what makes the
//! controllers testable with canned pages.

use async_trait::async_trait;
use std::sync::Arc;

use officine_core::{ListPage, ProduitRow, VenteRow};
use officine_gateway::{GatewayResult, RemoteGateway};

/// A paginated read-path collection.
#[async_trait]
pub trait RecordSource: Send + Sync + 'static {
    type Record: Send + 'static;

    /// Fetches one page. `page` is 1-based.
    async fn fetch_page(&self, page: u32, per_page: u32)
        -> GatewayResult<ListPage<Self::Record>>;
}

/// The product catalog, backed by `produitspaginated`.
#[derive(Clone)]
pub struct ProductSource {
    gateway: Arc<RemoteGateway>,
}

impl ProductSource {
    pub fn new(gateway: Arc<RemoteGateway>) -> Self {
        ProductSource { gateway }
    }
}

#[async_trait]
impl RecordSource for ProductSource {
    type Record = ProduitRow;

    async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> GatewayResult<ListPage<ProduitRow>> {
        self.gateway.produits_page(page, per_page).await
    }
}

/// The sales ledger, backed by `ventespaginated`.
#[derive(Clone)]
pub struct VenteSource {
    gateway: Arc<RemoteGateway>,
}

impl VenteSource {
    pub fn new(gateway: Arc<RemoteGateway>) -> Self {
        VenteSource { gateway }
    }
}

#[async_trait]
impl RecordSource for VenteSource {
    type Record = VenteRow;

    async fn fetch_page(&self, page: u32, per_page: u32) -> GatewayResult<ListPage<VenteRow>> {
        self.gateway.ventes_page(page, per_page).await
    }
}
