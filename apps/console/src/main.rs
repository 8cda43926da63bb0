//! # Officine Console - Smoke Binary
//!
//! Headless run of the full stack against a live backend. Restores the
//! stored session (or logs in from env credentials), mounts the
//! Products and Ventes screens, and prints page 1 of each with its
//! pager. Exercises the gateway end to end without the web frontend.
//!
//! ## Environment
//! - `OFFICINE_API_URL`   - backend base URL (default http://localhost:8000)
//! - `OFFICINE_TOKEN`     - bearer token to restore
//! - `OFFICINE_EMAIL` / `OFFICINE_PASSWORD` - credentials when no token
//! - `RUST_LOG`           - tracing filter (default info,officine=debug)

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use officine_console::{Gate, ListController, ProductSource, Shell, VenteSource};
use officine_core::{PageItem, DEFAULT_PAGE_SIZE};
use officine_gateway::{GatewayConfig, RemoteGateway, SessionStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,officine=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn render_pager(pager: &[PageItem]) -> String {
    pager
        .iter()
        .map(|item| match item {
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = GatewayConfig::from_env_or(None);
    info!(base_url = %config.base_url, "Starting console");

    let session = match std::env::var("OFFICINE_TOKEN") {
        Ok(token) => SessionStore::with_token(token),
        Err(_) => SessionStore::new(),
    };

    let gateway = match RemoteGateway::new(config, session) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            error!(error = %e, "Could not build the gateway");
            return ExitCode::FAILURE;
        }
    };

    let shell = Shell::new(gateway.clone());
    shell.restore().await;

    if shell.gate().await == Gate::SignedOut {
        let email = std::env::var("OFFICINE_EMAIL").unwrap_or_default();
        let password = std::env::var("OFFICINE_PASSWORD").unwrap_or_default();
        if let Err(e) = shell.login(&email, &password).await {
            error!(error = %e, "Sign-in failed");
            return ExitCode::FAILURE;
        }
    }

    if let Gate::SignedIn(user) = shell.gate().await {
        println!("Connecté: {}", user.name);
    }

    // Products screen, page 1.
    let produits = ListController::new(Arc::new(ProductSource::new(gateway.clone())), DEFAULT_PAGE_SIZE);
    if let Err(e) = produits.mount().await {
        error!(error = %e, "Products fetch failed");
        return ExitCode::FAILURE;
    }
    produits
        .with_state(|s| {
            if let Some(data) = s.data() {
                println!("\nProduits ({} au total)", data.total);
                for row in &data.items {
                    println!(
                        "  #{:<6} {:<40} pv {:>10.0}",
                        row.id,
                        row.designation,
                        row.pv.unwrap_or(0.0)
                    );
                }
                println!("  pages: {}", render_pager(&s.pager()));
            }
        })
        .await;

    // Ventes screen, page 1.
    let ventes = ListController::new(Arc::new(VenteSource::new(gateway.clone())), DEFAULT_PAGE_SIZE);
    if let Err(e) = ventes.mount().await {
        error!(error = %e, "Ventes fetch failed");
        return ExitCode::FAILURE;
    }
    ventes
        .with_state(|s| {
            if let Some(data) = s.data() {
                println!("\nVentes ({} au total)", data.total);
                for row in &data.items {
                    println!(
                        "  #{:<6} {:<16} total {:>12.0}  {}",
                        row.id,
                        row.numero.as_deref().unwrap_or("-"),
                        row.montant_affiche().unwrap_or(0.0),
                        if row.est_paye() { "payée" } else { "impayée" }
                    );
                }
                println!("  pages: {}", render_pager(&s.pager()));
            }
        })
        .await;

    ExitCode::SUCCESS
}
