//! # OpenDAL Server Example
//!
//! Runs a [`CorvusServer`] on top of two OpenDAL operators, one per tier.
//! Uses the `fs` service here; swap in `S3`, `Gcs` or `Azblob` builders for
//! bucket-backed tiers.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example opendal_server --features "server opendal mock_auth"
//! ```

use corvus::prelude::*;
use opendal::{Operator, services::Fs};
use std::env;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let live = Fs::default().root("./corvus_live");
    let cold = Fs::default().root("./corvus_cold");

    let storage = OpendalTierStorage::new(
        Operator::new(live).unwrap().finish(),
        Operator::new(cold).unwrap().finish(),
    );

    let auth = AllowAllAuth;

    let app = CorvusServer::default().build(storage, auth);

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    println!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
