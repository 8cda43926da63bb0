//! # officine-gateway: Remote Data Gateway
//!
//! All network I/O for the Officine console lives here: the GraphQL
//! read path, the REST write path and the bearer-token session store.
//!
//! ## Call Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Gateway Call Shape                                   │
//! │                                                                         │
//! │  Controller                 RemoteGateway                Backend        │
//! │  ──────────                 ─────────────                ───────        │
//! │                                                                         │
//! │  produits_page(1, 5) ─────► GET /graphql?query={…} ────► resolver      │
//! │                             + Authorization: Bearer …                   │
//! │               ◄──────────── { data: { produitspaginated } }            │
//! │               parse envelope, reject on non-empty errors               │
//! │                                                                         │
//! │  save_produit(payload) ───► POST /api/produits ────────► controller    │
//! │                             + Authorization: Bearer …                   │
//! │               ◄──────────── 200/201 ok, anything else carries the      │
//! │                             server-supplied message                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`client`] - [`RemoteGateway`], the typed query/write surface
//! - [`session`] - [`SessionStore`], the in-memory bearer credential
//! - [`graphql`] - read-path envelope types
//! - [`config`] - base URL / timeout configuration
//! - [`error`] - gateway error taxonomy

pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod session;

pub use client::RemoteGateway;
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use session::SessionStore;
