//! End-to-end tests for the transaction-authorization core.
//!
//! These exercise the public API only: key generation and derivation,
//! fixed-point conversion, signing, the JSON wire form, verification, and the
//! node client against an in-process mock node that applies transfers the way
//! a real one would (verify signature, check nonce, move balance).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use physicscoin_protocol::address::is_valid_address;
use physicscoin_protocol::amount::{calculate_fee, from_femto, from_femto_f64, to_femto};
use physicscoin_protocol::client::{ClientError, NodeClient, NodeHealth};
use physicscoin_protocol::config::{ClientConfig, FEMTO_PER_COIN};
use physicscoin_protocol::crypto::{derive_keypair_from_seed, mnemonic_to_seed, Keypair};
use physicscoin_protocol::transaction::{
    check_transaction, sign_transaction, sign_transfer, verify_transaction, InvalidReason,
    Transaction, UnsignedTransaction, Verification,
};

const T: u64 = 1_700_000_000;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn coins(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn transfer(from: &Keypair, to: &Keypair, amount_femto: u128, nonce: u64) -> Transaction {
    UnsignedTransaction::new(from.address(), to.address(), amount_femto, nonce, T)
        .sign(from)
        .unwrap()
}

/// Serializes, edits one field, and deserializes, the way a tampering
/// intermediary would.
fn tamper(tx: &Transaction, field: &str, value: Value) -> Transaction {
    let mut wire = serde_json::to_value(tx).unwrap();
    wire[field] = value;
    serde_json::from_value(wire).unwrap()
}

// ---------------------------------------------------------------------------
// Core scenarios
// ---------------------------------------------------------------------------

#[test]
fn alice_pays_bob() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();

    let secret = alice.secret_key().to_hex();
    let tx = sign_transfer(
        &alice.address().to_hex(),
        &bob.address().to_hex(),
        coins("100.0"),
        0,
        T,
        &secret,
    )
    .unwrap();

    assert!(is_valid_address(tx.from_address()));
    assert!(is_valid_address(tx.to_address()));
    assert_eq!(tx.amount_femto(), 100 * FEMTO_PER_COIN);
    assert!(verify_transaction(&tx));

    // Bumping the nonce without re-signing must fail.
    let replayed = tamper(&tx, "nonce", json!(1));
    assert_eq!(replayed.nonce(), 1);
    assert!(!verify_transaction(&replayed));
}

#[test]
fn reference_amount_converts_exactly_through_signing() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let femto = to_femto(coins("100.5")).unwrap();
    assert_eq!(femto, 100_500_000_000_000_000);

    let tx = transfer(&alice, &bob, femto, 0);
    assert_eq!(tx.amount_coins().unwrap(), coins("100.5"));
    assert_eq!(from_femto(tx.amount_femto()).unwrap(), coins("100.5"));
    assert_eq!(calculate_fee(tx.amount_coins().unwrap()), Decimal::ZERO);
}

#[test]
fn large_transfers_sign_and_verify_offline() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let secret = alice.secret_key().to_hex();

    for amount in ["1000000", "1000000.5", "21000000", "20999999.9999999"] {
        let tx = sign_transfer(
            &alice.address().to_hex(),
            &bob.address().to_hex(),
            coins(amount),
            0,
            T,
            &secret,
        )
        .unwrap();
        assert_eq!(tx.amount_coins().unwrap(), coins(amount));
        assert!(verify_transaction(&tx), "{amount}");

        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount_femto(), tx.amount_femto());
        assert!(verify_transaction(&back), "{amount} after the wire");
    }
}

#[test]
fn wire_payload_has_the_documented_shape() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let tx = transfer(&alice, &bob, 100_500_000_000_000_000, 4);

    let wire = serde_json::to_value(&tx).unwrap();
    assert_eq!(wire["from"], json!(alice.address().to_hex()));
    assert_eq!(wire["to"], json!(bob.address().to_hex()));
    assert_eq!(wire["amount"], json!(100.5));
    assert_eq!(wire["nonce"], json!(4));
    assert_eq!(wire["timestamp"], json!(T));
    assert_eq!(wire["signature"].as_str().unwrap().len(), 128);

    let back: Transaction = serde_json::from_value(wire).unwrap();
    assert!(verify_transaction(&back));
}

#[test]
fn every_tampered_field_fails() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let mallory = Keypair::generate();
    let tx = transfer(&alice, &bob, 5 * FEMTO_PER_COIN, 9);

    let edits = [
        ("from", json!(mallory.address().to_hex())),
        ("to", json!(mallory.address().to_hex())),
        ("amount", json!(50.0)),
        ("amount", json!("5.000000000000001")),
        ("nonce", json!(10)),
        ("timestamp", json!(T + 1)),
        ("signature", json!(transfer(&alice, &bob, 1, 9).signature())),
    ];
    for (field, value) in edits {
        let forged = tamper(&tx, field, value.clone());
        assert!(!verify_transaction(&forged), "{field} = {value}");
    }
}

#[test]
fn malformed_inputs_verify_false_with_a_reason() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let tx = transfer(&alice, &bob, 1, 0);

    let bad_sig = tamper(&tx, "signature", json!("not hex"));
    assert!(!verify_transaction(&bad_sig));
    assert!(matches!(
        check_transaction(&bad_sig),
        Verification::Invalid(InvalidReason::Malformed(_))
    ));

    let bad_from = tamper(&tx, "from", json!("a".repeat(63)));
    assert!(!verify_transaction(&bad_from));
}

#[test]
fn derived_wallets_sign_and_verify() {
    let seed = mnemonic_to_seed("correct horse battery staple");
    let first = derive_keypair_from_seed(&seed, 0);
    let second = derive_keypair_from_seed(&seed, 1);
    assert_eq!(first, derive_keypair_from_seed(&seed, 0));
    assert_ne!(first, second);

    let tx = sign_transaction(
        &first.address().to_hex(),
        &second.address().to_hex(),
        42,
        0,
        T,
        &first.secret_key().to_hex(),
    )
    .unwrap();
    assert!(verify_transaction(&tx));
}

#[test]
fn concurrent_verification_needs_no_coordination() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let txs: Vec<Transaction> = (0..64u64)
        .map(|n| transfer(&alice, &bob, u128::from(n) + 1, n))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| txs.iter().all(verify_transaction)))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_signed_transfer_verifies(
        secret in any::<[u8; 32]>(),
        to in any::<[u8; 32]>(),
        digits in 0u64..1_000_000_000_000_000,
        shift in 0u32..=7,
        nonce in any::<u64>(),
        timestamp in any::<u64>(),
    ) {
        // At most 15 significant digits, up to about ten million coins.
        let amount = u128::from(digits) * 10u128.pow(shift);
        let signer = Keypair::from_seed_bytes(&secret);
        let tx = sign_transaction(
            &signer.address().to_hex(),
            &hex::encode(to),
            amount,
            nonce,
            timestamp,
            &hex::encode(secret),
        )
        .unwrap();
        prop_assert!(verify_transaction(&tx));

        // The wire form must carry the exact signed amount.
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.amount_femto(), amount);
        prop_assert!(verify_transaction(&back));
    }
}

// ---------------------------------------------------------------------------
// Client against a mock node
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Ledger {
    balances: HashMap<String, u128>,
    nonces: HashMap<String, u64>,
    version: u64,
}

type SharedLedger = Arc<Mutex<Ledger>>;

fn node_error(code: i64, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "code": code, "message": message } })),
    )
        .into_response()
}

async fn send_handler(State(ledger): State<SharedLedger>, Json(tx): Json<Transaction>) -> Response {
    if !verify_transaction(&tx) {
        return node_error(-32000, "Transaction failed: invalid signature");
    }
    let mut ledger = ledger.lock().unwrap();
    let from = tx.from_address().to_lowercase();
    let to = tx.to_address().to_lowercase();

    if ledger.nonces.get(&from).copied().unwrap_or(0) != tx.nonce() {
        return node_error(-32000, "Transaction failed: invalid nonce");
    }
    let balance = ledger.balances.get(&from).copied().unwrap_or(0);
    let Some(remaining) = balance.checked_sub(tx.amount_femto()) else {
        return node_error(-32000, "Transaction failed: insufficient funds");
    };

    ledger.balances.insert(from.clone(), remaining);
    *ledger.balances.entry(to).or_default() += tx.amount_femto();
    *ledger.nonces.entry(from).or_default() += 1;
    ledger.version += 1;

    Json(json!({
        "success": true,
        "amount": from_femto_f64(tx.amount_femto()),
        "tx_hash": "pending",
    }))
    .into_response()
}

async fn balance_handler(
    State(ledger): State<SharedLedger>,
    Path(address): Path<String>,
) -> Json<Value> {
    let ledger = ledger.lock().unwrap();
    let balance = ledger.balances.get(&address).copied();
    Json(json!({
        "address": address,
        "balance": from_femto_f64(balance.unwrap_or(0)),
        "nonce": ledger.nonces.get(&address).copied().unwrap_or(0),
        "exists": balance.is_some(),
    }))
}

async fn health_handler(State(ledger): State<SharedLedger>) -> Json<Value> {
    let ledger = ledger.lock().unwrap();
    let sum: u128 = ledger.balances.values().sum();
    Json(json!({
        "status": "healthy",
        "conservation_verified": true,
        "conservation_error": 0.0,
        "total_supply": from_femto_f64(sum),
        "wallet_sum": from_femto_f64(sum),
        "wallets": ledger.balances.len(),
        "state_version": ledger.version,
    }))
}

async fn conservation_handler() -> Json<Value> {
    Json(json!({ "verified": true, "total_supply": 1000.0, "wallet_sum": 1000.0, "error": 0.0 }))
}

async fn proof_handler(State(ledger): State<SharedLedger>, Json(body): Json<Value>) -> Response {
    let Some(address) = body["address"].as_str() else {
        return node_error(-32602, "Missing address");
    };
    let ledger = ledger.lock().unwrap();
    Json(json!({
        "address": address,
        "balance": from_femto_f64(ledger.balances.get(address).copied().unwrap_or(0)),
        "nonce": ledger.nonces.get(address).copied().unwrap_or(0),
        "state_hash": "00".repeat(32),
        "timestamp": T,
        "exists": ledger.balances.contains_key(address),
    }))
    .into_response()
}

async fn state_hash_handler(State(ledger): State<SharedLedger>) -> Json<Value> {
    let version = ledger.lock().unwrap().version;
    Json(json!({
        "current_hash": "11".repeat(32),
        "prev_hash": "22".repeat(32),
        "version": version,
        "timestamp": T,
    }))
}

async fn stats_handler() -> Json<Value> {
    Json(json!({
        "block_height": 12,
        "total_supply": 1000.0,
        "total_wallets": 2,
        "avg_balance": 500.0,
        "max_balance": 900.0,
        "validators": 1,
        "state_version": 3,
        "timestamp": T,
    }))
}

/// Starts the mock node on an ephemeral port and returns a client for it.
async fn spawn_node(ledger: SharedLedger) -> NodeClient {
    let router = Router::new()
        .route("/transaction/send", post(send_handler))
        .route("/balance/:address", get(balance_handler))
        .route("/explorer/wallet/:address", get(balance_handler))
        .route("/explorer/health", get(health_handler))
        .route("/conservation", get(conservation_handler))
        .route("/proof/generate", post(proof_handler))
        .route("/explorer/state/hash", get(state_hash_handler))
        .route("/explorer/stats", get(stats_handler))
        .with_state(ledger);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_secs(5));
    NodeClient::new(config).unwrap()
}

fn funded_ledger(address: &str, femto: u128) -> SharedLedger {
    let mut ledger = Ledger::default();
    ledger.balances.insert(address.to_string(), femto);
    Arc::new(Mutex::new(ledger))
}

#[tokio::test]
async fn client_submits_and_node_applies_transfer() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let ledger = funded_ledger(&alice.address().to_hex(), 1_000 * FEMTO_PER_COIN);
    let client = spawn_node(Arc::clone(&ledger)).await;

    let tx = transfer(&alice, &bob, 100_500_000_000_000_000, 0);
    let result = client.send_transaction(&tx).await.unwrap();
    assert!(result.success);
    assert_eq!(result.amount, Some(coins("100.5")));

    let bob_info = client.get_balance(&bob.address().to_hex()).await.unwrap();
    assert!(bob_info.exists);
    assert_eq!(bob_info.balance, coins("100.5"));

    let alice_info = client.get_wallet_details(&alice.address().to_hex()).await.unwrap();
    assert_eq!(alice_info.balance, coins("899.5"));
    assert_eq!(alice_info.nonce, 1);

    client.close();
}

#[tokio::test]
async fn million_coin_transfer_reaches_the_node_intact() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let ledger = funded_ledger(&alice.address().to_hex(), 21_000_000 * FEMTO_PER_COIN);
    let client = spawn_node(Arc::clone(&ledger)).await;

    let tx = transfer(&alice, &bob, 1_000_000 * FEMTO_PER_COIN, 0);
    let result = client.send_transaction(&tx).await.unwrap();
    assert!(result.success);
    assert_eq!(result.amount, Some(coins("1000000")));

    let bob_info = client.get_balance(&bob.address().to_hex()).await.unwrap();
    assert_eq!(bob_info.balance, coins("1000000"));
    let alice_info = client.get_balance(&alice.address().to_hex()).await.unwrap();
    assert_eq!(alice_info.balance, coins("20000000"));

    let health = client.get_health().await.unwrap();
    assert_eq!(health.total_supply, coins("21000000"));
}

#[tokio::test]
async fn node_rejections_surface_as_errors() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let ledger = funded_ledger(&alice.address().to_hex(), 10 * FEMTO_PER_COIN);
    let client = spawn_node(ledger).await;

    // Replaying nonce 0 after it has been used.
    let tx = transfer(&alice, &bob, FEMTO_PER_COIN, 0);
    client.send_transaction(&tx).await.unwrap();
    let err = client.send_transaction(&tx).await.unwrap_err();
    match err {
        ClientError::Rejected { status, code, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
            assert_eq!(code, -32000);
            assert!(message.contains("nonce"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    // A forged transfer never gets past signature verification.
    let forged = tamper(&transfer(&alice, &bob, 1, 1), "amount", json!(9.0));
    let err = client.send_transaction(&forged).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { .. }));
}

#[tokio::test]
async fn client_reads_node_state() {
    let alice = Keypair::generate();
    let address = alice.address().to_hex();
    let client = spawn_node(funded_ledger(&address, 7 * FEMTO_PER_COIN)).await;

    let health = client.get_health().await.unwrap();
    assert_eq!(health.status, NodeHealth::Healthy);
    assert_eq!(health.total_supply, coins("7"));
    assert_eq!(health.wallets, 1);

    let report = client.verify_conservation().await.unwrap();
    assert!(report.verified);
    assert_eq!(report.error, 0.0);

    let proof = client.generate_proof(&address).await.unwrap();
    assert_eq!(proof.address, address);
    assert_eq!(proof.balance, coins("7"));
    assert!(proof.exists);

    let state = client.get_state_hash().await.unwrap();
    assert_eq!(state.current_hash.len(), 64);
    assert_eq!(state.version, 0);

    let stats = client.get_network_stats().await.unwrap();
    assert_eq!(stats.block_height, 12);
    assert_eq!(stats.avg_balance, coins("500"));
}

#[tokio::test]
async fn unknown_routes_are_status_errors() {
    let client = spawn_node(Arc::default()).await;
    let config = ClientConfig::new(format!("{}/missing", client.config().base_url));
    let lost = NodeClient::new(config).unwrap();
    let err = lost.get_health().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Status { status, .. } if status == StatusCode::NOT_FOUND.as_u16()
    ));
}

#[tokio::test]
async fn unreachable_node_is_an_http_error() {
    let config = ClientConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(500));
    let client = NodeClient::new(config).unwrap();
    let err = client.get_health().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
