//! wh-keygen: WireHub identity tool
//!
//! Generates proof-of-work identities and inspects keys and overlay addresses.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use shared_crypto::x25519_base;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wh_01_identity::{key_workbit, FileSecretStore, KeySearch, KeySearchConfig, SecretStore};
use wh_02_endpoint::derive_orchid;

use crate::config::ToolConfig;

/// wh-keygen: WireHub identity tool
#[derive(Parser, Debug)]
#[command(name = "wh-keygen", version)]
#[command(about = "Generate and inspect WireHub identities")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a key meeting a workbit difficulty
    Genkey {
        /// Minimum workbit (overrides [keysearch].workbit)
        #[arg(short, long)]
        workbit: Option<u32>,

        /// Search threads, 0 = 2 * cores - 1 (overrides [keysearch].workers)
        #[arg(short = 'j', long)]
        workers: Option<usize>,

        /// Give up after this many seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Proof-of-work challenge (overrides [identity].challenge)
        #[arg(long)]
        challenge: Option<String>,

        /// Write the secret key here (overrides [identity].secret_key)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the public key of a stored secret key
    Pubkey {
        /// Secret key file (defaults to [identity].secret_key)
        key: Option<PathBuf>,
    },

    /// Print the workbit a public key reaches for a challenge
    Workbit {
        /// Base64 X25519 public key
        public_key: String,

        /// Proof-of-work challenge (overrides [identity].challenge)
        #[arg(long)]
        challenge: Option<String>,
    },

    /// Print the ORCHID address of a public key
    Orchid {
        /// Base64 X25519 public key
        public_key: String,

        /// Context (overrides [identity].orchid_context)
        #[arg(long)]
        context: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ToolConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Genkey {
            workbit,
            workers,
            timeout,
            challenge,
            out,
        } => {
            let mut search = config.keysearch.clone();
            if let Some(wb) = workbit {
                search.workbit = wb;
            }
            if let Some(n) = workers {
                search.workers = n;
            }
            let challenge = challenge.unwrap_or(config.identity.challenge.clone());
            let out = out.or(config.identity.secret_key.clone());
            genkey(&config, search, timeout, &challenge, out)
        }
        Command::Pubkey { key } => {
            let path = key
                .or(config.identity.secret_key.clone())
                .context("no key file given and [identity].secret_key not set")?;
            let secret = FileSecretStore::new()
                .load(&path)?
                .with_context(|| format!("no secret key at {}", path.display()))?;
            println!("{}", STANDARD.encode(x25519_base(secret.expose())));
            Ok(())
        }
        Command::Workbit {
            public_key,
            challenge,
        } => {
            let key = decode_public(&public_key)?;
            let challenge = challenge.unwrap_or(config.identity.challenge);
            println!("{}", key_workbit(&key, challenge.as_bytes())?);
            Ok(())
        }
        Command::Orchid {
            public_key,
            context,
        } => {
            let key = decode_public(&public_key)?;
            let context = context.unwrap_or(config.identity.orchid_context);
            println!("{}", derive_orchid(&key, context.as_bytes(), 0).ip_string());
            Ok(())
        }
    }
}

fn genkey(
    config: &ToolConfig,
    search: KeySearchConfig,
    timeout: Option<u64>,
    challenge: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut runner = KeySearch::new(search);
    if let Some(secs) = timeout {
        runner = runner.with_timeout(Duration::from_secs(secs));
    }

    let outcome = runner
        .run(challenge.as_bytes())
        .context("key generation failed")?;
    let keypair = &outcome.keypair;

    if let Some(path) = &out {
        FileSecretStore::new()
            .save(path, keypair.dh_secret())
            .with_context(|| format!("writing secret key to {}", path.display()))?;
        info!("Secret key written to {}", path.display());
    }

    let orchid = derive_orchid(keypair.dh_public(), config.identity.orchid_context.as_bytes(), 0);
    println!("public key:   {}", STANDARD.encode(keypair.dh_public()));
    println!("signing key:  {}", hex::encode(keypair.signing_public()));
    println!("workbit:      {}", outcome.workbit_achieved);
    println!("attempts:     {}", outcome.attempts);
    println!("orchid:       {}", orchid.ip_string());
    Ok(())
}

fn decode_public(text: &str) -> Result<[u8; 32]> {
    let bytes = STANDARD
        .decode(text.trim())
        .context("public key is not base64")?;
    match <[u8; 32]>::try_from(bytes.as_slice()) {
        Ok(key) => Ok(key),
        Err(_) => bail!("public key must be 32 bytes, got {}", bytes.len()),
    }
}
