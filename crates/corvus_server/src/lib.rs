//! # Corvus Server
//!
//! A modular, Axum-based implementation of the asset reconstitution protocol.
//!
//! Provides the [`CorvusServer`] builder, which ties together a tier storage
//! backend and an authentication provider to serve the recovery API.
//!
//! ## Permissions
//!
//! Enforces a scoped permission system. Authentication providers must grant
//! the following scopes in their `User` object:
//!
//! * **`read`**: to authenticate at all; enough to poll for and claim a key.
//! * **`recover`**: to file recovery tickets. Guest accounts never carry it.
//! * **`admin`**: to view the ticket queue and issue claim keys. (Note: Admin tokens cannot be minted via the API and only Admins can mint tokens carrying privileged scopes).
//!
//! ## Example
//!
//! ```no_run
//! use corvus_server::prelude::*;
//! use corvus_fs::FsTierStorage;
//! use corvus_auth_mock::AllowAllAuth;
//!
//! # async fn run() {
//! let storage = FsTierStorage::new("./corvus_live", "./corvus_cold");
//! let auth = AllowAllAuth;
//!
//! let app = CorvusServer::default().build(storage, auth);
//! # }
//! ```

mod api;

pub mod jwt;

pub mod auth;
pub mod state;

use corvus_core::traits::{AuthProvider, TierStorage};
use corvus_vault::engine::RecoveryEngine;
use corvus_vault::sweeper;

use auth::JwtServiceAuthProvider;
use axum::{
    Router,
    routing::{get, post},
};
use jwt::JwtService;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// The builder for the Corvus Server.
#[derive(Clone, Debug, Default)]
pub struct CorvusServer {
    config: CorvusServerConfig,
}

impl CorvusServer {
    pub fn new(config: CorvusServerConfig) -> Self {
        Self { config }
    }
}

#[derive(Clone, Debug)]
pub struct CorvusServerConfig {
    pub jwt_secret: String,
    /// How long an unclaimed key stays redeemable, in hours.
    pub retention_hours: i64,
    /// Seconds between expiry sweeper passes.
    pub sweep_interval_seconds: u64,
}

impl Default for CorvusServerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "TOP_SECRET".to_string(),
            retention_hours: 24,
            sweep_interval_seconds: 60 * 60 * 24,
        }
    }
}

impl CorvusServer {
    /// Builds the router and spawns the expiry sweeper.
    ///
    /// Must be called within a Tokio runtime.
    pub fn build<S: TierStorage, A: AuthProvider>(self, storage: S, auth: A) -> Router {
        let CorvusServerConfig {
            jwt_secret,
            retention_hours,
            sweep_interval_seconds,
            ..
        } = self.config;
        let jwt_service = JwtService::new(&jwt_secret);

        let engine = Arc::new(
            RecoveryEngine::new(storage)
                .with_retention(chrono::Duration::hours(retention_hours)),
        );
        sweeper::spawn(engine.clone(), Duration::from_secs(sweep_interval_seconds));

        let state = AppState {
            engine,
            auth: JwtServiceAuthProvider::new(jwt_service.clone(), auth),
            jwt_service,
        };

        Router::new()
            .route("/health", get(|| async { "OK" }))
            .route("/auth/token", post(api::issue_token))
            .route(
                "/recovery/tickets",
                post(api::submit_ticket).get(api::list_tickets),
            )
            .route("/recovery/restore", post(api::restore))
            .route("/recovery/check", get(api::check_recovery))
            .route("/recovery/claim", post(api::claim))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

pub mod prelude {
    pub use crate::auth::*;
    pub use crate::jwt::*;
    pub use crate::state::*;
    pub use crate::{CorvusServer, CorvusServerConfig};
}
