//! # Node Client
//!
//! A thin HTTP façade over a node's JSON API. It turns a signed
//! [`Transaction`] into a submission and query calls into typed responses
//! from [`models`]. It does not retry, cache, or rate-limit; the ledger rules
//! (nonce order, balances, conservation) are enforced on the node.
//!
//! One [`NodeClient`] owns one pooled `reqwest::Client`, with the
//! configured timeout applied to every request. Dropping the client, or
//! calling [`NodeClient::close`], releases its connections.
//!
//! ```no_run
//! # async fn run() -> Result<(), physicscoin_protocol::client::ClientError> {
//! use physicscoin_protocol::client::NodeClient;
//! use physicscoin_protocol::config::ClientConfig;
//!
//! let client = NodeClient::new(ClientConfig::default())?;
//! let health = client.get_health().await?;
//! println!("node is {:?}", health.status);
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod models;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::address::{Address, EncodingError};
use crate::config::ClientConfig;
use crate::transaction::Transaction;
use models::ErrorEnvelope;

pub use models::{
    BalanceProof, ConservationReport, HealthStatus, NetworkStats, NodeHealth, SendResult,
    StateHash, WalletInfo,
};

/// Failures talking to the node.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connect, timeout, TLS, or an undecodable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with its JSON error envelope.
    #[error("node rejected request ({status}): {message} (code {code})")]
    Rejected {
        status: u16,
        code: i64,
        message: String,
    },

    /// Any other non-success status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The address was refused before any request was made.
    #[error(transparent)]
    InvalidAddress(#[from] EncodingError),
}

/// HTTP client for one node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    config: ClientConfig,
    http: Client,
}

#[derive(Serialize)]
struct ProofRequest<'a> {
    address: &'a str,
}

impl NodeClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "node client ready");
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits a signed transaction. Drafts cannot be passed here; sign
    /// first.
    pub async fn send_transaction(&self, tx: &Transaction) -> Result<SendResult, ClientError> {
        tracing::info!(
            from = %crate::address::format_address(tx.from_address(), 16),
            nonce = tx.nonce(),
            amount_femto = %tx.amount_femto(),
            "submitting transaction"
        );
        self.post("/transaction/send", tx).await
    }

    /// Balance, nonce, and existence flag for `address`.
    pub async fn get_balance(&self, address: &str) -> Result<WalletInfo, ClientError> {
        let address = Address::parse("address", address)?;
        self.get(&format!("/balance/{address}")).await
    }

    /// Explorer view of a wallet, with rank and share of supply.
    pub async fn get_wallet_details(&self, address: &str) -> Result<WalletInfo, ClientError> {
        let address = Address::parse("address", address)?;
        self.get(&format!("/explorer/wallet/{address}")).await
    }

    pub async fn get_health(&self) -> Result<HealthStatus, ClientError> {
        self.get("/explorer/health").await
    }

    pub async fn verify_conservation(&self) -> Result<ConservationReport, ClientError> {
        self.get("/conservation").await
    }

    pub async fn generate_proof(&self, address: &str) -> Result<BalanceProof, ClientError> {
        let address = Address::parse("address", address)?.to_hex();
        self.post("/proof/generate", &ProofRequest { address: &address })
            .await
    }

    pub async fn get_state_hash(&self) -> Result<StateHash, ClientError> {
        self.get("/explorer/state/hash").await
    }

    pub async fn get_network_stats(&self) -> Result<NetworkStats, ClientError> {
        self.get("/explorer/stats").await
    }

    /// Releases pooled connections. Equivalent to dropping the client,
    /// spelled out for call sites that want the release to be visible.
    pub fn close(self) {
        tracing::debug!(base_url = %self.config.base_url, "node client closed");
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let status = status.as_u16();
    let body = response.text().await?;
    tracing::warn!(status, "node returned an error status");
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => Err(ClientError::Rejected {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
        }),
        Err(_) => Err(ClientError::Status { status, body }),
    }
}
