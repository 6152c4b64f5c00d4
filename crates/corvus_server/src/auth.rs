use crate::api::ApiError;
use crate::jwt::JwtService;
use crate::state::AppState;

use corvus_core::constants::scopes;
use corvus_core::prelude::*;

use axum::{extract::FromRequestParts, http::request::Parts};

fn bearer_token(parts: &Parts) -> &str {
    parts
        .headers
        .get("Authorization")
        .and_then(|auth_header| {
            auth_header
                .to_str()
                .map(|header_str| {
                    header_str
                        .strip_prefix("Bearer ")
                        .unwrap_or(header_str)
                        .trim()
                })
                .ok()
        })
        .unwrap_or("")
}

/// A wrapper struct indicating a request has been authenticated.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

impl<S, A> FromRequestParts<AppState<S, A>> for AuthenticatedUser
where
    S: TierStorage,
    A: AuthProvider,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, A>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts);
        let user = state.auth.verify(token).await.map_err(ApiError::from)?;

        Ok(AuthenticatedUser(user))
    }
}

/// An authenticated caller holding the `admin` scope.
///
/// Key issuance and ticket listing reject everyone else before any state is
/// touched.
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

impl<S, A> FromRequestParts<AppState<S, A>> for AdminUser
where
    S: TierStorage,
    A: AuthProvider,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, A>,
    ) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.has_scope(scopes::ADMIN) {
            return Err(ApiError::from(AuthError::Forbidden(
                "Admin clearance required".into(),
            )));
        }

        Ok(AdminUser(user))
    }
}

/// An authenticated caller holding the `recover` scope.
///
/// Guest accounts never carry it and so cannot file recovery tickets.
#[derive(Clone, Debug)]
pub struct RecoveryUser(pub User);

impl<S, A> FromRequestParts<AppState<S, A>> for RecoveryUser
where
    S: TierStorage,
    A: AuthProvider,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, A>,
    ) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.has_scope(scopes::RECOVER) {
            return Err(ApiError::from(AuthError::Forbidden(
                "Guest accounts are restricted from recovery requests".into(),
            )));
        }

        Ok(RecoveryUser(user))
    }
}

/// Tries the session JWT first and falls back to the wrapped provider, so
/// both minted sessions and provider-native tokens work against the API.
#[derive(Clone)]
pub struct JwtServiceAuthProvider<P: AuthProvider> {
    jwt_service: JwtService,
    provider: P,
}

impl<P: AuthProvider> JwtServiceAuthProvider<P> {
    pub fn new(jwt_service: JwtService, provider: P) -> Self {
        Self {
            jwt_service,
            provider,
        }
    }
}

impl<P: AuthProvider> AuthProvider for JwtServiceAuthProvider<P> {
    async fn verify(&self, token: &str) -> Result<User, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Missing);
        }

        match self.jwt_service.verify(token) {
            Ok(user) => Ok(user),
            Err(AuthError::Expired) => Err(AuthError::Expired),
            Err(_) => self.provider.verify(token).await,
        }
    }
}
