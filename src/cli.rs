// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::chain::is_default_beacon_id;
use crate::chain::ChainInfo;
use crate::chain::ChainInfoPacket;
use crate::chain::DEFAULT_BEACON_ID;
use crate::config::default_config_path;
use crate::config::ChainVerificationParams;
use crate::config::VerificationOptions;
use crate::core::verify_packet;
use crate::core::BeaconPacket;
use crate::core::SchemeId;
use crate::log::init_log;
use crate::log::Logger;

use anyhow::bail;
use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "drand-verifier")]
#[command(about = "Verifies drand randomness beacons against their chain information", long_about = None)]
pub struct Cli {
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify a beacon, as returned by `/public/<round>`, against the chain info returned by `/info`.
    Verify {
        /// Path to the beacon JSON.
        #[arg(long)]
        beacon: PathBuf,
        /// Path to the chain info JSON.
        #[arg(long)]
        info: PathBuf,
        /// Configuration file. Defaults to ~/.drand-verifier/config.toml when present.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Accept beacons without any check (not recommended, testing only).
        #[arg(long)]
        disable_beacon_verification: bool,
    },
    #[command(subcommand)]
    Util(Util),
    #[command(subcommand)]
    Config(Config),
}

#[derive(Subcommand, Debug)]
pub enum Util {
    /// List all scheme ids supported by the verifier
    ListSchemes,
    /// Print the latest round emitted by a chain at the given UNIX time (now by default)
    RoundAt {
        #[arg(long)]
        info: PathBuf,
        #[arg(long)]
        time: Option<u64>,
    },
    /// Recompute the chain hash and compare it with the declared one
    ChainHash {
        #[arg(long)]
        info: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum Config {
    /// Write a configuration file with secure defaults
    Init {
        /// Destination path. Defaults to ~/.drand-verifier/config.toml
        #[arg(long)]
        path: Option<PathBuf>,
        /// Pin the chain hash and public key of this chain info in the configuration.
        #[arg(long)]
        info: Option<PathBuf>,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Error reading: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Error parsing: {}", path.display()))
}

fn read_chain_info(path: &Path) -> anyhow::Result<ChainInfo> {
    let packet: ChainInfoPacket = read_json(path)?;
    Ok(ChainInfo::from_packet(&packet)?)
}

/// Explicit path must exist, the default one is optional.
fn load_options(path: Option<PathBuf>) -> anyhow::Result<VerificationOptions> {
    if let Some(path) = path {
        return Ok(VerificationOptions::load(&path)?);
    }
    match default_config_path() {
        Ok(path) if path.exists() => Ok(VerificationOptions::load(&path)?),
        _ => Ok(VerificationOptions::default()),
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        init_log(self.verbose)?;
        match self.commands {
            Commands::Verify {
                beacon,
                info,
                config,
                disable_beacon_verification,
            } => verify(&beacon, &info, config, disable_beacon_verification)?,
            Commands::Util(Util::ListSchemes) => {
                for scheme in SchemeId::list_schemes() {
                    println!("{scheme}");
                }
            }
            Commands::Util(Util::RoundAt { info, time }) => {
                let info = read_chain_info(&info)?;
                let round = match time {
                    Some(time) => info.round_at(time),
                    None => info.current_round(),
                };
                println!("{round}");
            }
            Commands::Util(Util::ChainHash { info }) => {
                let info = read_chain_info(&info)?;
                println!("{}", hex::encode(info.hash()));
                info.verify_hash()?;
            }
            Commands::Config(Config::Init { path, info }) => {
                let path = match path {
                    Some(path) => path,
                    None => default_config_path()?,
                };
                let chain_verification = match info {
                    Some(info) => {
                        let info = read_chain_info(&info)?;
                        info.verify_hash()?;
                        Some(ChainVerificationParams {
                            chain_hash: info.hash().to_vec(),
                            public_key: info.public_key().to_vec(),
                        })
                    }
                    None => None,
                };
                let options = VerificationOptions {
                    disable_beacon_verification: false,
                    chain_verification,
                };
                options.save(&path)?;
                println!("{}", path.display());
            }
        }

        Ok(())
    }
}

fn verify(
    beacon: &Path,
    info: &Path,
    config: Option<PathBuf>,
    disable_beacon_verification: bool,
) -> anyhow::Result<()> {
    let packet: BeaconPacket = read_json(beacon)?;
    let info = read_chain_info(info)?;
    let mut options = load_options(config)?;
    options.disable_beacon_verification |= disable_beacon_verification;

    let beacon_id = match info.beacon_id() {
        id if is_default_beacon_id(id) => DEFAULT_BEACON_ID,
        id => id,
    };
    let chain_log = Logger::register_chain(beacon_id);
    let round_log = chain_log.new_child(format!(".{}", packet.round));
    let _guard = round_log.span.enter();
    debug!(
        "chain {}, scheme {}, period {}",
        hex::encode(info.hash()),
        info.scheme_id(),
        info.period()
    );

    if let Some(params) = &options.chain_verification {
        info.check_parity(params)?;
    }
    if let Err(err) = info.verify_hash() {
        warn!("{err}");
    }

    let verdict = verify_packet(&packet, &info, &options)?;
    println!("{verdict}");
    if let Some(reason) = verdict.reason() {
        bail!("beacon for round {} rejected: {reason}", packet.round)
    }
    info!("beacon for round {} verified", packet.round);

    Ok(())
}
