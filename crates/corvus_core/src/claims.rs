use serde::{Deserialize, Serialize};

/// JWT payload minted by the server's session service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,
    /// Expiry as unix seconds.
    pub exp: u64,
    pub scopes: Vec<String>,
}
