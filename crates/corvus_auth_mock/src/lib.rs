//! # Corvus Auth Mock
//!
//! Dummy authentication providers for development and testing.
//!
//! **WARNING**: [`AllowAllAuth`] lets ANY token pass as a valid user with full
//! admin permissions.
//!
//! **DO NOT use this in production!!!**
//!
//! ## Usage
//!
//! ```rust
//! # use corvus_auth_mock::AllowAllAuth;
//! # fn main() {
//! let auth = AllowAllAuth;
//! # }
//! ```

use corvus_core::constants::scopes;
use corvus_core::prelude::*;

#[derive(Clone)]
pub struct AllowAllAuth;

impl AuthProvider for AllowAllAuth {
    async fn verify(&self, _token: &str) -> Result<User, AuthError> {
        Ok(User {
            id: "dev_user".to_string(),
            scopes: vec![
                scopes::ADMIN.to_string(),
                scopes::RECOVER.to_string(),
                scopes::READ.to_string(),
            ],
        })
    }
}

/// Rejects every token. Useful as the fallback provider when a test wants the
/// JWT session service to be the only way in.
#[derive(Clone)]
pub struct RejectAllAuth;

impl AuthProvider for RejectAllAuth {
    async fn verify(&self, _token: &str) -> Result<User, AuthError> {
        Err(AuthError::Invalid)
    }
}
