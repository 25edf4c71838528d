//! Typed shapes of node API responses.
//!
//! These are deserialized and handed back as-is. Balances and supply figures
//! come from the node as JSON numbers with eight decimals; they are parsed
//! into [`Decimal`] so printing them does not introduce float noise, but
//! nothing here recomputes or checks them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `GET /balance/{address}` and `GET /explorer/wallet/{address}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub nonce: u64,
    /// The explorer endpoint omits this for known wallets.
    #[serde(default = "default_true")]
    pub exists: bool,
    /// Explorer only.
    #[serde(default)]
    pub rank: Option<u32>,
    /// Explorer only.
    #[serde(default)]
    pub percent_of_supply: Option<f64>,
}

fn default_true() -> bool {
    true
}

/// `POST /transaction/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendResult {
    pub success: bool,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeHealth {
    Healthy,
    Unhealthy,
}

/// `GET /explorer/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: NodeHealth,
    pub conservation_verified: bool,
    pub conservation_error: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_supply: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub wallet_sum: Decimal,
    pub wallets: u32,
    pub state_version: u64,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == NodeHealth::Healthy
    }
}

/// `GET /conservation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConservationReport {
    pub verified: bool,
    pub error: f64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_supply: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub wallet_sum: Option<Decimal>,
}

/// `POST /proof/generate`. A snapshot claim by the node, not a
/// cryptographic proof this crate can check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceProof {
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub nonce: u64,
    pub state_hash: String,
    pub timestamp: u64,
    pub exists: bool,
}

/// `GET /explorer/state/hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHash {
    pub current_hash: String,
    #[serde(default)]
    pub prev_hash: Option<String>,
    pub version: u64,
    pub timestamp: u64,
}

/// `GET /explorer/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub block_height: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_supply: Decimal,
    pub total_wallets: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_balance: Decimal,
    pub validators: u32,
    pub state_version: u64,
    pub timestamp: u64,
}

/// Error envelope the node returns with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: i64,
    pub message: String,
}
