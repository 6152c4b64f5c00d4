//! # 🐦‍⬛ Corvus
//![![License](https://img.shields.io/badge/license-MIT%2FApache-blue.svg)](https://github.com/corvus-vault/corvus?tab=readme-ov-file#license)
//!
//!> *The raven brings it back*
//!
//! An asset recovery server: users file recovery tickets, an administrator issues a
//! single-use claim key that stages the cold backup into quarantine, and the user
//! redeems the key to promote the asset back into the live tier.
//!
//! This crate serves as an entry point, re-exporting the core types and the vault
//! engine, and optionally including server, client, and storage implementations via
//! feature flags.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **`server`** | Includes the Axum-based server implementation (`corvus_server`). |
//! | **`client`** | Includes the HTTP client (`corvus_client`) for tooling and polling frontends. |
//! | **`fs`** | Tier storage backend for the local filesystem (`corvus_fs`). |
//! | **`opendal`** | Tier storage backend for OpenDAL (`corvus_opendal`). |
//! | **`mock_auth`** | Development authentication providers (`corvus_auth_mock`). |
//!
//! ## Example: Custom Server
//!
//! ```toml
//! [dependencies]
//! corvus = { version = "0.4", features = ["server", "fs", "mock_auth"] }
//! ```
//!
//! ```rust,ignore
//! use corvus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let storage = FsTierStorage::new("./corvus_live", "./corvus_cold");
//!     let auth = AllowAllAuth;
//!
//!     // Build
//!     let app = CorvusServer::default().build(storage, auth);
//!
//!     // Serve
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub use corvus_core::*;

pub mod vault {
    pub use corvus_vault::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use corvus_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use corvus_client::*;
}

#[cfg(feature = "fs")]
pub mod fs {
    pub use corvus_fs::*;
}

#[cfg(feature = "mock_auth")]
pub mod auth_mock {
    pub use corvus_auth_mock::*;
}

#[cfg(feature = "opendal")]
pub mod opendal {
    pub use corvus_opendal::*;
}

pub mod prelude {
    pub use corvus_core::prelude::*;
    pub use corvus_vault::prelude::*;

    #[cfg(feature = "server")]
    pub use corvus_server::prelude::*;

    #[cfg(feature = "client")]
    pub use corvus_client::CorvusClient;

    #[cfg(feature = "fs")]
    pub use corvus_fs::FsTierStorage;

    #[cfg(feature = "mock_auth")]
    pub use corvus_auth_mock::{AllowAllAuth, RejectAllAuth};

    #[cfg(feature = "opendal")]
    pub use corvus_opendal::OpendalTierStorage;
}
