//! # Recovery Client Example
//!
//! Walks the user side of the handshake against a running server: file a
//! ticket, poll until the administrator issues a key, redeem it.
//!
//! ## Usage
//!
//! ```sh
//! CORVUS_URL=http://localhost:3000 CORVUS_TOKEN=... \
//!     cargo run --example recovery_client --features "client" -- proj.c
//! ```

use corvus::prelude::*;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let base_url = env::var("CORVUS_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let token = env::var("CORVUS_TOKEN").ok();
    let filename = env::args().nth(1).unwrap_or_else(|| "proj.c".to_string());

    let client = CorvusClient::new(base_url, token);

    let ticket = client.submit_ticket(&filename).await.unwrap();
    println!("Ticket #{} filed for {}", ticket.id, ticket.filename);
    println!("Waiting for the administrator to issue a claim key...");

    let notice = client
        .poll_recovery(Duration::from_secs(10), 360)
        .await
        .unwrap();
    let key = notice.key.expect("ready notice always carries a key");
    println!("Key received: {key}");

    let restored = client.redeem_key(&key).await.unwrap();
    println!("{restored} reconstituted into the live tier.");
}
