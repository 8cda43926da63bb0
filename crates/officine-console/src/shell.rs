//! # Shell Gate
//!
//! Session restore and the signed-in/out gate the whole console hangs
//! off. On startup the shell probes a stored token with `me`; a token
//! the backend no longer honours is cleared rather than retried.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use officine_core::UserInfo;
use officine_gateway::RemoteGateway;

use crate::error::ConsoleResult;

/// Where the shell currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Startup probe still in flight.
    Booting,
    /// No usable session; show the login surface.
    SignedOut,
    /// Authenticated; screens may mount.
    SignedIn(UserInfo),
}

/// The console shell.
#[derive(Clone)]
pub struct Shell {
    gateway: Arc<RemoteGateway>,
    gate: Arc<RwLock<Gate>>,
}

impl Shell {
    pub fn new(gateway: Arc<RemoteGateway>) -> Self {
        Shell {
            gateway,
            gate: Arc::new(RwLock::new(Gate::Booting)),
        }
    }

    /// Startup probe: a stored token is only trusted once `me` answers.
    pub async fn restore(&self) {
        if !self.gateway.session().is_signed_in().await {
            debug!("No stored token");
            *self.gate.write().await = Gate::SignedOut;
            return;
        }

        match self.gateway.me().await {
            Ok(user) => {
                info!(user = %user.name, "Session restored");
                *self.gate.write().await = Gate::SignedIn(user);
            }
            Err(e) => {
                warn!(error = %e, "Stored token rejected");
                self.gateway.session().clear_token().await;
                *self.gate.write().await = Gate::SignedOut;
            }
        }
    }

    /// Signs in and resolves the user in one step.
    pub async fn login(&self, email: &str, password: &str) -> ConsoleResult<UserInfo> {
        self.gateway.login(email, password).await?;
        let user = self.gateway.me().await?;
        info!(user = %user.name, "Signed in");
        *self.gate.write().await = Gate::SignedIn(user.clone());
        Ok(user)
    }

    /// Drops the session locally; no server round trip.
    pub async fn logout(&self) {
        self.gateway.session().clear_token().await;
        *self.gate.write().await = Gate::SignedOut;
        info!("Signed out");
    }

    pub async fn gate(&self) -> Gate {
        self.gate.read().await.clone()
    }

    pub fn gateway(&self) -> &Arc<RemoteGateway> {
        &self.gateway
    }
}
