//! # CLI Interface
//!
//! Defines the command-line argument structure for `pcw` using `clap`
//! derive. Node connection and logging options are global; key material is
//! read from a key file, never from a flag.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use physicscoin_protocol::config::DEFAULT_NODE_URL;

/// PhysicsCoin wallet.
///
/// Generates and derives Ed25519 keys, converts coin amounts to femto-units,
/// signs and verifies transfers offline, and talks to a node's HTTP API.
#[derive(Parser, Debug)]
#[command(
    name = "pcw",
    about = "PhysicsCoin command-line wallet",
    version,
    propagate_version = true
)]
pub struct PcwCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Base URL of the node API.
    #[arg(long, global = true, env = "PHYSICSCOIN_NODE_URL", default_value = DEFAULT_NODE_URL)]
    pub node_url: String,

    /// Per-request timeout for node calls, in seconds.
    #[arg(long, global = true, env = "PHYSICSCOIN_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log format on stderr: "pretty" or "json".
    #[arg(long, global = true, env = "PHYSICSCOIN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh keypair and write its secret key to a key file.
    Keygen(KeygenArgs),
    /// Derive a keypair from a mnemonic phrase and an index.
    Derive(DeriveArgs),
    /// Check that an address is 64 hexadecimal characters.
    Address(AddressArgs),
    /// Convert a decimal coin amount to femto-units.
    ToFemto(ToFemtoArgs),
    /// Convert femto-units to a decimal coin amount.
    FromFemto(FromFemtoArgs),
    /// Sign a transfer offline and print the JSON payload.
    Sign(TransferArgs),
    /// Verify a signed JSON payload. Exits non-zero when it is invalid.
    Verify(VerifyArgs),
    /// Sign a transfer and submit it to the node.
    Send(TransferArgs),
    /// Query a wallet's balance and nonce.
    Balance(BalanceArgs),
    /// Query node health and the conservation check.
    Health,
    /// Ask the node for a balance snapshot of an address.
    Proof(AddressArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct KeyFileArg {
    /// Path to the hex-encoded secret key file.
    #[arg(long, short = 'k', env = "PHYSICSCOIN_KEY_FILE", default_value = "pcw.key")]
    pub key_file: PathBuf,
}

/// Arguments for `keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    #[command(flatten)]
    pub key: KeyFileArg,

    /// Replace an existing key file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `derive`.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Mnemonic phrase. Prefer the environment variable over the flag so the
    /// phrase stays out of shell history.
    #[arg(long, env = "PHYSICSCOIN_MNEMONIC", hide_env_values = true)]
    pub mnemonic: String,

    /// Derivation index.
    #[arg(long, short = 'i', default_value_t = 0)]
    pub index: u32,

    /// Also write the derived secret key to this file.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Replace an existing output file.
    #[arg(long, requires = "out")]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct AddressArgs {
    /// 64-character hex address.
    pub address: String,
}

#[derive(Args, Debug)]
pub struct ToFemtoArgs {
    /// Decimal coin amount, e.g. `100.5`.
    pub amount: String,
}

#[derive(Args, Debug)]
pub struct FromFemtoArgs {
    /// Amount in femto-units (10^-15 coins).
    pub femto: u128,

    /// Fixed number of decimal places to print. Exact when omitted.
    #[arg(long)]
    pub decimals: Option<u32>,
}

/// Arguments shared by `sign` and `send`.
#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(flatten)]
    pub key: KeyFileArg,

    /// Recipient address.
    #[arg(long)]
    pub to: String,

    /// Decimal coin amount.
    #[arg(long)]
    pub amount: String,

    /// Sender nonce. Must match the node's next expected nonce.
    #[arg(long)]
    pub nonce: u64,

    /// Unix timestamp in seconds. Defaults to now.
    #[arg(long)]
    pub timestamp: Option<u64>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// File with the signed JSON payload. Reads stdin when omitted.
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Wallet address.
    pub address: String,

    /// Use the explorer view, which adds rank and share of supply.
    #[arg(long)]
    pub details: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        PcwCli::command().debug_assert();
    }

    #[test]
    fn sign_parses_transfer_fields() {
        let cli = PcwCli::try_parse_from([
            "pcw", "sign", "--key-file", "alice.key", "--to", &"b".repeat(64), "--amount",
            "100.5", "--nonce", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Sign(args) => {
                assert_eq!(args.key.key_file, PathBuf::from("alice.key"));
                assert_eq!(args.amount, "100.5");
                assert_eq!(args.nonce, 3);
                assert_eq!(args.timestamp, None);
            }
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = PcwCli::try_parse_from([
            "pcw", "health", "--node-url", "http://10.0.0.5:8545", "--timeout-secs", "5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Health));
        assert_eq!(cli.global.node_url, "http://10.0.0.5:8545");
        assert_eq!(cli.global.timeout_secs, 5);
    }

    #[test]
    fn derive_force_requires_out() {
        let err = PcwCli::try_parse_from(["pcw", "derive", "--mnemonic", "a b c", "--force"]);
        assert!(err.is_err());
    }

    #[test]
    fn sign_requires_nonce() {
        let err = PcwCli::try_parse_from([
            "pcw", "sign", "--to", &"b".repeat(64), "--amount", "1",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn from_femto_accepts_supply_sized_amounts() {
        let cli = PcwCli::try_parse_from(["pcw", "from-femto", "21000000000000000000000"]).unwrap();
        match cli.command {
            Commands::FromFemto(args) => assert_eq!(args.femto, 21_000_000 * 10u128.pow(15)),
            other => panic!("parsed as {other:?}"),
        }
    }
}
