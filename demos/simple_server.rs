//! # Simple Server Example
//!
//! Showcases a minimal [`CorvusServer`] using the local filesystem and mock authentication.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example simple_server --features "server fs mock_auth"
//! ```

use corvus::prelude::*;
use std::env;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Providers & Services
    let storage = FsTierStorage::new("./corvus_live", "./corvus_cold");

    // Don't use this in production! This is just for demonstration/testing purposes
    let auth = AllowAllAuth; // e.g., use your own OAuth-backed provider instead

    // Build App
    let app = CorvusServer::default().build(storage, auth);

    // Serve
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    println!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
