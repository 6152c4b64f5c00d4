//! # Corvus Client
//!
//! An async HTTP client for interacting with a Corvus Server.
//!
//! Used by tooling and polling frontends to file recovery tickets, watch for
//! an issued claim key, and redeem it, as well as by administrators to work
//! the ticket queue and mint authentication tokens.
//!
//! ## Example: A full recovery, user side
//!
//! ```no_run
//!  use corvus_client::CorvusClient;
//!  use std::time::Duration;
//!
//!  async fn run() -> Result<(), corvus_client::CorvusClientError> {
//!     let client = CorvusClient::new("http://localhost:3000", Some("my-token".into()));
//!
//!     // Ask the administrator for help
//!     client.submit_ticket("proj.c").await?;
//!
//!     // Wait for the claim key to show up
//!     let notice = client.poll_recovery(Duration::from_secs(10), 360).await?;
//!     let key = notice.key.expect("ready notice always carries a key");
//!
//!     // Final handshake
//!     let filename = client.redeem_key(&key).await?;
//!     println!("{filename} reconstituted");
//!     Ok(())
//! }
//! ```

use corvus_core::constants::routes::*;
use corvus_core::recovery::{RecoveryNotice, Ticket};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorvusClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned error {0}: {1}")]
    ServerError(StatusCode, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timed out waiting for a claim key")]
    PollTimeout,
}

pub type Result<T> = std::result::Result<T, CorvusClientError>;

#[derive(Clone)]
pub struct CorvusClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

#[derive(Serialize)]
struct CreateTokenRequest {
    subject: String,
    duration_seconds: Option<u64>,
    scopes: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct CreateTokenResponse {
    token: String,
    #[allow(dead_code)]
    expires_in: u64,
}

#[derive(Deserialize)]
struct RestoreResponse {
    claim_key: String,
}

#[derive(Deserialize)]
struct ClaimResponse {
    filename: String,
}

impl CorvusClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            token,
        }
    }

    fn auth_request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            builder.header("Authorization", format!("Bearer {token}"))
        } else {
            builder
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CorvusClientError::ServerError(status, text));
        }
        Ok(response)
    }

    pub async fn mint_token(
        &self,
        subject: &str,
        duration_seconds: Option<u64>,
        scopes: Option<Vec<String>>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, AUTH_TOKEN);

        let req = CreateTokenRequest {
            subject: subject.to_string(),
            duration_seconds,
            scopes,
        };

        let response = self
            .auth_request(self.client.post(&url))
            .json(&req)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let data: CreateTokenResponse = response
            .json()
            .await
            .map_err(|_| CorvusClientError::Validation("Failed to parse token response".into()))?;

        Ok(data.token)
    }

    /// Files a recovery ticket for one of the caller's own assets.
    pub async fn submit_ticket(&self, filename: &str) -> Result<Ticket> {
        let url = format!("{}{}", self.base_url, RECOVERY_TICKETS);
        let response = self
            .auth_request(self.client.post(&url))
            .json(&serde_json::json!({ "filename": filename }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let ticket: Ticket = response
            .json()
            .await
            .map_err(|_| CorvusClientError::Validation("Failed to parse ticket".into()))?;

        Ok(ticket)
    }

    /// Administrator: the pending ticket queue, oldest first.
    pub async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let url = format!("{}{}", self.base_url, RECOVERY_TICKETS);
        let response = self.auth_request(self.client.get(&url)).send().await?;
        let response = Self::check_status(response).await?;

        let tickets: Vec<Ticket> = response
            .json()
            .await
            .map_err(|_| CorvusClientError::Validation("Failed to parse ticket list".into()))?;

        Ok(tickets)
    }

    /// Administrator: stages the cold backup and returns the claim key.
    ///
    /// The key is surfaced here exactly once; pass it on to the owner.
    pub async fn issue_key(&self, owner: &str, filename: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, RECOVERY_RESTORE);
        let response = self
            .auth_request(self.client.post(&url))
            .json(&serde_json::json!({ "owner": owner, "filename": filename }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let data: RestoreResponse = response
            .json()
            .await
            .map_err(|_| CorvusClientError::Validation("Failed to parse restore response".into()))?;

        Ok(data.claim_key)
    }

    /// One poll: is a key waiting for the caller?
    pub async fn check_recovery(&self) -> Result<RecoveryNotice> {
        let url = format!("{}{}", self.base_url, RECOVERY_CHECK);
        let response = self.auth_request(self.client.get(&url)).send().await?;
        let response = Self::check_status(response).await?;

        let notice: RecoveryNotice = response
            .json()
            .await
            .map_err(|_| CorvusClientError::Validation("Failed to parse recovery notice".into()))?;

        Ok(notice)
    }

    /// Polls [`check_recovery`](Self::check_recovery) on an interval until a
    /// key is ready, for at most `max_attempts` rounds.
    pub async fn poll_recovery(
        &self,
        interval: std::time::Duration,
        max_attempts: u32,
    ) -> Result<RecoveryNotice> {
        for _ in 0..max_attempts {
            let notice = self.check_recovery().await?;
            if notice.ready {
                return Ok(notice);
            }
            tokio::time::sleep(interval).await;
        }

        Err(CorvusClientError::PollTimeout)
    }

    /// The final handshake: redeems a claim key, returning the filename of
    /// the reconstituted asset.
    pub async fn redeem_key(&self, key: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, RECOVERY_CLAIM);
        let response = self
            .auth_request(self.client.post(&url))
            .json(&serde_json::json!({ "key": key }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let data: ClaimResponse = response
            .json()
            .await
            .map_err(|_| CorvusClientError::Validation("Failed to parse claim response".into()))?;

        Ok(data.filename)
    }
}
