use crate::prelude::*;

use corvus_core::constants::scopes::*;
use corvus_core::prelude::*;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use tracing::error;

pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn storage_error_response(err: &StorageError, source: &anyhow::Error) -> (StatusCode, String) {
    match err {
        StorageError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        StorageError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        StorageError::Unsupported(_) => (StatusCode::NOT_IMPLEMENTED, err.to_string()),
        _ => {
            error!("Internal Server StorageError: {:?}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage Error - try again".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<RecoveryError>() {
            return match err {
                RecoveryError::AssetNotFound(_) | RecoveryError::NoActiveRecovery => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                RecoveryError::DuplicateTicket { .. }
                | RecoveryError::AlreadyClaimed
                | RecoveryError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
                RecoveryError::InvalidKey => (StatusCode::FORBIDDEN, err.to_string()),
                RecoveryError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                RecoveryError::Storage(storage_err) => {
                    storage_error_response(storage_err, &self.0)
                }
            }
            .into_response();
        }

        if let Some(err) = self.0.downcast_ref::<StorageError>() {
            return storage_error_response(err, &self.0).into_response();
        }

        if let Some(err) = self.0.downcast_ref::<AuthError>() {
            return match err {
                AuthError::Invalid | AuthError::Expired | AuthError::Missing => {
                    (StatusCode::UNAUTHORIZED, err.to_string())
                }
                AuthError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
                AuthError::System(_) => {
                    error!("Internal Auth Provider Error: {:?}", self.0);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Auth Error".to_string())
                }
            }
            .into_response();
        }

        error!("Internal Server Error: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
            .into_response()
    }
}

#[derive(serde::Deserialize)]
pub struct SubmitTicketRequest {
    pub filename: String,
}

/// POST /recovery/tickets
///
/// Files a recovery request for the caller's own asset.
pub async fn submit_ticket<S: TierStorage, A: AuthProvider>(
    State(state): State<AppState<S, A>>,
    RecoveryUser(user): RecoveryUser,
    Json(req): Json<SubmitTicketRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ticket = state.engine.submit_ticket(&user.id, &req.filename)?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /recovery/tickets
///
/// The administrator's view of the queue, oldest first.
pub async fn list_tickets<S: TierStorage, A: AuthProvider>(
    State(state): State<AppState<S, A>>,
    _: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.engine.list_tickets()))
}

#[derive(serde::Deserialize)]
pub struct RestoreRequest {
    pub owner: String,
    pub filename: String,
}

/// POST /recovery/restore
///
/// Stages the cold backup into quarantine and returns the claim key. The key
/// is surfaced here exactly once.
pub async fn restore<S: TierStorage, A: AuthProvider>(
    State(state): State<AppState<S, A>>,
    _: AdminUser,
    Json(req): Json<RestoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let key = state.engine.issue_key(&req.owner, &req.filename).await?;

    let res = Json(serde_json::json!({
        "success": true,
        "claim_key": key
    }));

    Ok(res)
}

/// GET /recovery/check
///
/// Poll endpoint for frontends waiting on a key.
pub async fn check_recovery<S: TierStorage, A: AuthProvider>(
    State(state): State<AppState<S, A>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.engine.check_recovery(&user.id)))
}

#[derive(serde::Deserialize)]
pub struct ClaimRequest {
    pub key: String,
}

/// POST /recovery/claim
///
/// The final handshake: validates the presented key and promotes the asset
/// back into the live tier.
pub async fn claim<S: TierStorage, A: AuthProvider>(
    State(state): State<AppState<S, A>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(req): Json<ClaimRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let filename = state.engine.redeem_key(&user.id, &req.key).await?;

    let res = Json(serde_json::json!({
        "success": true,
        "filename": filename
    }));

    Ok(res)
}

#[derive(serde::Deserialize)]
pub struct CreateTokenRequest {
    /// Who is this token for? (e.g., "alice", "build_server")
    pub subject: String,
    /// How long should it last?
    ///
    /// Default: 1 year
    pub duration_seconds: Option<u64>,
    /// Optional scopes
    ///
    /// Default: `read`
    pub scopes: Option<Vec<String>>,
}

/// POST /auth/token
pub async fn issue_token<S: TierStorage, A: AuthProvider>(
    State(state): State<AppState<S, A>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(req): Json<CreateTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let scopes = req.scopes.unwrap_or_else(|| vec![READ.to_string()]);
    let is_admin = user.has_scope(ADMIN);
    let privileged_scopes = [ADMIN, RECOVER];

    if !is_admin {
        for scope in &scopes {
            if privileged_scopes.contains(&scope.as_str()) {
                return Err(ApiError::from(AuthError::Forbidden(format!(
                    "Insufficient permissions to mint '{scope}' token."
                ))));
            }
        }
    }

    let duration = req.duration_seconds.unwrap_or(31_536_000); // 1 year
    let token = state.jwt_service.mint(req.subject, scopes, duration)?;

    let res = Json(serde_json::json!({
        "token": token,
        "expires_in": duration
    }));

    Ok(res)
}
