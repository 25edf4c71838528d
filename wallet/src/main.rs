// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # PhysicsCoin Wallet
//!
//! Entry point for the `pcw` binary. Parses CLI arguments, initializes
//! logging, and dispatches to one subcommand. Offline subcommands (keys,
//! amounts, signing, verification) never open a network connection; the
//! rest go through [`NodeClient`].
//!
//! Results go to stdout; logs and diagnostics go to stderr.

mod cli;
mod keystore;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

use physicscoin_protocol::address::{is_valid_address, Address};
use physicscoin_protocol::amount::{convert_str_to_femto, format_coins, from_femto, validate_femto};
use physicscoin_protocol::client::NodeClient;
use physicscoin_protocol::config::{ClientConfig, PROTOCOL_VERSION, SIGNING_ALGORITHM};
use physicscoin_protocol::crypto::{derive_keypair_from_seed, mnemonic_to_seed, Keypair};
use physicscoin_protocol::transaction::{check_transaction, Transaction, UnsignedTransaction, Verification};

use cli::{Commands, GlobalArgs, PcwCli};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = PcwCli::parse();
    logging::init_logging(
        logging::DEFAULT_FILTER,
        LogFormat::from_str_lossy(&cli.global.log_format),
    );

    match cli.command {
        Commands::Keygen(args) => keygen(args).map(|_| ExitCode::SUCCESS),
        Commands::Derive(args) => derive(args).map(|_| ExitCode::SUCCESS),
        Commands::Address(args) => Ok(check_address(&args.address)),
        Commands::ToFemto(args) => to_femto(&args.amount).map(|_| ExitCode::SUCCESS),
        Commands::FromFemto(args) => from_femto_cmd(args).map(|_| ExitCode::SUCCESS),
        Commands::Sign(args) => {
            let tx = build_transfer(&args)?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify(args) => verify(args),
        Commands::Send(args) => send(&cli.global, args).await.map(|_| ExitCode::SUCCESS),
        Commands::Balance(args) => balance(&cli.global, args).await.map(|_| ExitCode::SUCCESS),
        Commands::Health => health(&cli.global).await,
        Commands::Proof(args) => proof(&cli.global, &args.address)
            .await
            .map(|_| ExitCode::SUCCESS),
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Generates a keypair, stores its secret, and prints the address.
fn keygen(args: cli::KeygenArgs) -> Result<()> {
    let keypair = Keypair::generate();
    keystore::write_key_file(&args.key.key_file, &keypair.secret_key(), args.force)?;

    tracing::info!(key_file = %args.key.key_file.display(), "keypair generated");
    println!("{}", keypair.address());
    Ok(())
}

fn derive(args: cli::DeriveArgs) -> Result<()> {
    let seed = mnemonic_to_seed(&args.mnemonic);
    let keypair = derive_keypair_from_seed(&seed, args.index);

    if let Some(out) = &args.out {
        keystore::write_key_file(out, &keypair.secret_key(), args.force)?;
        tracing::info!(index = args.index, key_file = %out.display(), "derived key written");
    }
    println!("{}", keypair.address());
    Ok(())
}

fn check_address(address: &str) -> ExitCode {
    if is_valid_address(address) {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::FAILURE
    }
}

fn to_femto(amount: &str) -> Result<()> {
    let conversion =
        convert_str_to_femto(amount).with_context(|| format!("invalid amount {amount:?}"))?;
    if conversion.truncated {
        tracing::warn!(amount, "digits past the 15th decimal place were dropped");
    }
    println!("{}", conversion.femto);
    Ok(())
}

fn from_femto_cmd(args: cli::FromFemtoArgs) -> Result<()> {
    let coins = match args.decimals {
        Some(decimals) => format_coins(args.femto, decimals)?,
        None => from_femto(args.femto)?.to_string(),
    };
    println!("{coins}");
    Ok(())
}

/// Reads the key file, converts the amount once, and signs.
fn build_transfer(args: &cli::TransferArgs) -> Result<Transaction> {
    let keypair = keystore::read_key_file(&args.key.key_file)?;
    let to = Address::parse("to", &args.to)?;

    let conversion = convert_str_to_femto(&args.amount)
        .with_context(|| format!("invalid amount {:?}", args.amount))?;
    if conversion.truncated {
        tracing::warn!(amount = %args.amount, "digits past the 15th decimal place were dropped");
    }
    if !validate_femto(conversion.femto) {
        bail!(
            "amount {} cannot be signed: it must be at least one femto-unit \
             and have at most 15 significant digits",
            args.amount
        );
    }

    let timestamp = match args.timestamp {
        Some(ts) => ts,
        None => u64::try_from(chrono::Utc::now().timestamp())
            .context("system clock is before the Unix epoch")?,
    };

    let tx = UnsignedTransaction::new(keypair.address(), to, conversion.femto, args.nonce, timestamp)
        .sign(&keypair)?;
    tracing::info!(
        to = %to,
        femto = %conversion.femto,
        nonce = args.nonce,
        "transfer signed"
    );
    Ok(tx)
}

fn verify(args: cli::VerifyArgs) -> Result<ExitCode> {
    let payload = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let tx: Transaction =
        serde_json::from_str(&payload).context("payload is not a transaction JSON object")?;
    match check_transaction(&tx) {
        Verification::Valid => {
            println!("VALID");
            Ok(ExitCode::SUCCESS)
        }
        Verification::Invalid(reason) => {
            tracing::warn!(%reason, "verification failed");
            println!("INVALID");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn connect(global: &GlobalArgs) -> Result<NodeClient> {
    let config = ClientConfig::new(global.node_url.as_str())
        .with_timeout(Duration::from_secs(global.timeout_secs));
    NodeClient::new(config).context("failed to build HTTP client")
}

async fn send(global: &GlobalArgs, args: cli::TransferArgs) -> Result<()> {
    let tx = build_transfer(&args)?;
    let client = connect(global)?;
    let result = client
        .send_transaction(&tx)
        .await
        .with_context(|| format!("node at {} refused the transaction", global.node_url))?;
    client.close();

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn balance(global: &GlobalArgs, args: cli::BalanceArgs) -> Result<()> {
    let client = connect(global)?;
    let info = if args.details {
        client.get_wallet_details(&args.address).await?
    } else {
        client.get_balance(&args.address).await?
    };
    client.close();

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Prints health and the conservation report. Exits non-zero when the node
/// reports itself unhealthy.
async fn health(global: &GlobalArgs) -> Result<ExitCode> {
    let client = connect(global)?;
    let status = client.get_health().await?;
    let conservation = client.verify_conservation().await?;
    let state = client.get_state_hash().await?;
    let stats = client.get_network_stats().await?;
    client.close();

    let healthy = status.is_healthy();
    let report = serde_json::json!({
        "health": status,
        "conservation": conservation,
        "state": state,
        "stats": stats,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if healthy {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("node reports unhealthy");
        Ok(ExitCode::FAILURE)
    }
}

async fn proof(global: &GlobalArgs, address: &str) -> Result<()> {
    let client = connect(global)?;
    let proof = client.generate_proof(address).await?;
    client.close();

    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(())
}

fn print_version() {
    println!("pcw       {}", env!("CARGO_PKG_VERSION"));
    println!("protocol  {}", PROTOCOL_VERSION);
    println!("signature {}", SIGNING_ALGORITHM);
}
