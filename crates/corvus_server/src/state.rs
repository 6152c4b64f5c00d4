use crate::auth::JwtServiceAuthProvider;
use crate::jwt::JwtService;

use corvus_core::prelude::*;
use corvus_vault::engine::RecoveryEngine;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState<S: TierStorage, A: AuthProvider> {
    pub engine: Arc<RecoveryEngine<S>>,
    pub auth: JwtServiceAuthProvider<A>,
    pub jwt_service: JwtService,
}
