//! axionax-genesis
//!
//! Runs the genesis ceremony for an axionax chain: generates the validator
//! set and role accounts, assembles and reconciles the genesis document,
//! hands the secrets to the chosen sink and writes `genesis.json` plus the
//! operator runbook.
//!
//! Usage:
//!   axionax-genesis [--config <json>] [--validators <n>] [--out-dir <dir>]
//!                   [--secrets keyfiles|encrypted|console|redact] [--keys-dir <dir>]
//!                   [--key-scheme digest|ed25519] [--genesis-time <rfc3339>] [--force]
//!   axionax-genesis --print-default-config
//!   axionax-genesis verify <genesis.json>

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use axionax_crypto::{KeySchemeKind, OsEntropy};
use axionax_genesis::{
    read_genesis, verify_document, EncryptedFile, GenesisConfig, GenesisPipeline, GenesisReport,
    KeyfileDirectory, PlaintextConsole, RedactingConsole, SecretSink,
};
#[cfg(test)]
use axionax_genesis::GENESIS_FILE;

const BUNDLE_FILE: &str = "genesis-secrets.sealed";

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "axionax-genesis",
    version,
    about = "axionax genesis ceremony: validators, allocations and genesis.json",
    args_conflicts_with_subcommands = true
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-run every reconciliation check on an existing genesis file.
    Verify {
        /// Path to genesis.json.
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// JSON file overriding the testnet defaults. Missing fields keep their default.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of genesis validators (overrides the config).
    #[arg(long)]
    validators: Option<u32>,

    /// Directory receiving genesis.json and VALIDATOR_SETUP.md.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Where generated secret keys go.
    #[arg(long, value_enum, default_value_t = SecretsMode::Keyfiles)]
    secrets: SecretsMode,

    /// Destination for `keyfiles` and `encrypted` secrets. Keep it off the
    /// machine that publishes genesis.json.
    #[arg(long, default_value = "~/.axionax/genesis-keys")]
    keys_dir: PathBuf,

    /// Key scheme for generated identities (overrides the config).
    #[arg(long, value_enum)]
    key_scheme: Option<KeySchemeArg>,

    /// Fixed genesis time (RFC 3339). Defaults to now.
    #[arg(long)]
    genesis_time: Option<DateTime<Utc>>,

    /// Replace an existing genesis.json in the output directory.
    #[arg(long)]
    force: bool,

    /// Print the effective default configuration as JSON and exit.
    #[arg(long)]
    print_default_config: bool,

    /// Passphrase for `--secrets encrypted`.
    #[arg(long, env = "AXIONAX_SECRETS_PASSPHRASE", hide = true, hide_env_values = true)]
    passphrase: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SecretsMode {
    /// Dry run: print addresses and public keys, discard secrets, write nothing.
    Redact,
    /// Print every secret in full on stdout.
    Console,
    /// One 0600 JSON keyfile per identity under --keys-dir.
    Keyfiles,
    /// One passphrase-sealed bundle under --keys-dir.
    Encrypted,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum KeySchemeArg {
    Digest,
    Ed25519,
}

impl From<KeySchemeArg> for KeySchemeKind {
    fn from(arg: KeySchemeArg) -> Self {
        match arg {
            KeySchemeArg::Digest => KeySchemeKind::Digest,
            KeySchemeArg::Ed25519 => KeySchemeKind::Ed25519,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,axionax=debug")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Some(Command::Verify { path }) => cmd_verify(&expand_tilde(&path)),
        None if args.generate.print_default_config => {
            println!("{}", serde_json::to_string_pretty(&GenesisConfig::default())?);
            Ok(())
        }
        None => cmd_generate(&args.generate),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let out_dir = expand_tilde(&args.out_dir);
    let keys_dir = expand_tilde(&args.keys_dir);

    println!();
    println!("Generating {} genesis ({})...", config.chain.chain_name, config.chain.chain_id);

    let mut pipeline = GenesisPipeline::new(config, OsEntropy)
        .context("invalid genesis configuration")?
        .overwrite(args.force);
    let genesis_time = args.genesis_time.unwrap_or_else(Utc::now);

    if args.secrets == SecretsMode::Redact {
        let build = pipeline
            .dry_run(&mut RedactingConsole::stdout(), genesis_time)
            .context("genesis dry run")?;
        println!();
        println!(
            "Dry run OK: {} validators, {} accounts reconciled.",
            build.document.validators.len(),
            build.document.app_state.accounts.len()
        );
        println!("Nothing was written and no secret was kept.");
        return Ok(());
    }

    let mut sink = make_sink(args.secrets, &keys_dir, args.passphrase.clone())?;
    let report = pipeline
        .run_at(&out_dir, sink.as_mut(), genesis_time)
        .with_context(|| format!("genesis ceremony in {}", out_dir.display()))?;

    print_summary(&report, pipeline.config(), args.secrets, &keys_dir);
    Ok(())
}

fn cmd_verify(path: &Path) -> anyhow::Result<()> {
    let doc = read_genesis(path).with_context(|| format!("reading {}", path.display()))?;
    verify_document(&doc).with_context(|| format!("{} failed reconciliation", path.display()))?;

    let denom = doc.app_state.staking.params.bond_denom.as_str();
    let supply = doc.declared_supply(denom)?.unwrap_or_default();
    info!(chain_id = %doc.chain_id, "genesis verified");

    println!("Genesis OK: {}", path.display());
    println!("  Chain ID:    {}", doc.chain_id);
    println!("  Validators:  {}", doc.validators.len());
    println!("  Accounts:    {}", doc.app_state.accounts.len());
    println!("  Supply:      {supply}{denom}");
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(args: &GenerateArgs) -> anyhow::Result<GenesisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let path = expand_tilde(path);
            GenesisConfig::from_json_file(&path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => GenesisConfig::default(),
    };
    if let Some(n) = args.validators {
        config.validators.count = n;
    }
    if let Some(scheme) = args.key_scheme {
        config.validators.key_scheme = scheme.into();
    }
    Ok(config)
}

fn make_sink(
    mode: SecretsMode,
    keys_dir: &Path,
    passphrase: Option<String>,
) -> anyhow::Result<Box<dyn SecretSink>> {
    Ok(match mode {
        SecretsMode::Redact => bail!("--secrets redact is a dry run and publishes nothing"),
        SecretsMode::Console => Box::new(PlaintextConsole::stdout()),
        SecretsMode::Keyfiles => Box::new(KeyfileDirectory::new(keys_dir)),
        SecretsMode::Encrypted => {
            let passphrase = match passphrase {
                Some(p) if !p.is_empty() => p,
                _ => bail!("--secrets encrypted needs AXIONAX_SECRETS_PASSPHRASE to be set"),
            };
            Box::new(EncryptedFile::new(keys_dir.join(BUNDLE_FILE), passphrase))
        }
    })
}

fn print_summary(report: &GenesisReport, config: &GenesisConfig, mode: SecretsMode, keys_dir: &Path) {
    let exponent = config.token.exponent;
    let symbol = &config.token.display_denom;
    let rule = "=".repeat(60);

    println!();
    println!("Genesis configuration saved to: {}", report.genesis_path.display());
    println!("Validator setup instructions saved to: {}", report.runbook_path.display());
    println!();
    println!("{rule}");
    println!("GENESIS CONFIGURATION COMPLETE");
    println!("{rule}");
    println!();
    println!("Chain ID:            {}", report.chain_id);
    println!("Genesis BLAKE3:      {}", report.genesis_digest);
    println!("Total Supply:        {} {symbol}", whole_tokens(report.total_supply, exponent));
    println!("Bonded at genesis:   {} {symbol}", whole_tokens(report.bonded, exponent));
    println!("Community pool:      {} {symbol}", whole_tokens(report.community_pool, exponent));
    println!("Genesis Validators:  {}", report.validators);
    println!("Initial Accounts:    {}", report.accounts);
    println!("Key scheme:          {}", report.key_scheme);
    println!();
    match mode {
        SecretsMode::Redact => {}
        SecretsMode::Console => {
            println!("IMPORTANT: Securely store all private keys printed above!");
            println!("Distribute validator keys to their operators and clear this terminal.");
        }
        SecretsMode::Keyfiles => {
            println!("{} keyfiles written to: {}", report.secrets_delivered, keys_dir.display());
            println!("Move them off this machine and distribute them to their operators.");
        }
        SecretsMode::Encrypted => {
            println!(
                "{} secrets sealed in: {}",
                report.secrets_delivered,
                keys_dir.join(BUNDLE_FILE).display()
            );
        }
    }
    println!();
    println!("{rule}");
}

/// Base units rendered as whole tokens with thousands separators. Any
/// fractional remainder is kept after a decimal point.
fn whole_tokens(base: u128, exponent: u32) -> String {
    let Some(unit) = 10u128.checked_pow(exponent) else {
        return base.to_string();
    };
    let whole = group_thousands(base / unit);
    match base % unit {
        0 => whole,
        frac => {
            let digits = format!("{frac:0width$}", width = exponent as usize);
            format!("{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Expand a leading `~` to `$HOME` (or `%USERPROFILE%` on Windows).
fn expand_tilde(path: &Path) -> PathBuf {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    expand_tilde_with(path, home.as_deref().map(Path::new))
}

fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(stripped), Some(home)) => home.join(stripped),
        _ => path.to_path_buf(),
    }
}
