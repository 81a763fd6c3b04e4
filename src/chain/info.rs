// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

use super::time;
use super::time::Seconds;
use crate::config::ChainVerificationParams;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use tracing::error;

/// Beacon id of chains predating multi-beacon support. Not part of the chain hash.
pub const DEFAULT_BEACON_ID: &str = "default";

/// Scheme of chains whose `/info` does not declare one.
pub const DEFAULT_SCHEME: &str = "pedersen-bls-chained";

pub fn is_default_beacon_id(beacon_id: &str) -> bool {
    beacon_id.is_empty() || beacon_id == DEFAULT_BEACON_ID
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.into()
}

/// Chain information as served by drand relays at `/info`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChainInfoPacket {
    pub public_key: String,
    pub period: u32,
    pub genesis_time: u64,
    pub hash: String,
    #[serde(rename = "groupHash", default)]
    pub group_hash: String,
    #[serde(rename = "schemeID", default = "default_scheme")]
    pub scheme_id: String,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Metadata {
    #[serde(rename = "beaconID", default)]
    pub beacon_id: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    #[error("chain info: {field}: malformed hex: {source}")]
    MalformedHex {
        field: &'static str,
        source: hex::FromHexError,
    },
    #[error("chain info: period can not be zero")]
    ZeroPeriod,
    #[error("chain info: declared hash {declared} does not match computed {computed}")]
    HashMismatch { declared: String, computed: String },
    #[error("chain info: {field} {received} does not match configured {expected}")]
    ParityMismatch {
        field: &'static str,
        expected: String,
        received: String,
    },
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, ChainError> {
    hex::decode(value).map_err(|source| ChainError::MalformedHex { field, source })
}

/// Public information that is necessary for a client to verify any beacon present in a randomness chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainInfo {
    public_key: Vec<u8>,
    period: Seconds,
    genesis_time: u64,
    hash: Vec<u8>,
    group_hash: Vec<u8>,
    scheme_id: String,
    beacon_id: String,
}

impl ChainInfo {
    /// Decodes the packet. The public key is kept as bytes and decoded as a curve
    /// point only when a beacon is verified, since its group depends on the scheme.
    pub fn from_packet(packet: &ChainInfoPacket) -> Result<Self, ChainError> {
        if packet.period == 0 {
            return Err(ChainError::ZeroPeriod);
        }

        let info = Self {
            public_key: decode_hex("public_key", &packet.public_key)?,
            period: Seconds::new(packet.period),
            genesis_time: packet.genesis_time,
            hash: decode_hex("hash", &packet.hash)?,
            group_hash: decode_hex("groupHash", &packet.group_hash)?,
            scheme_id: packet.scheme_id.clone(),
            beacon_id: packet.metadata.beacon_id.clone(),
        };

        Ok(info)
    }

    pub fn as_packet(&self) -> ChainInfoPacket {
        ChainInfoPacket {
            public_key: hex::encode(&self.public_key),
            period: self.period.get_value(),
            genesis_time: self.genesis_time,
            hash: hex::encode(&self.hash),
            group_hash: hex::encode(&self.group_hash),
            scheme_id: self.scheme_id.clone(),
            metadata: Metadata {
                beacon_id: self.beacon_id.clone(),
            },
        }
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn period(&self) -> Seconds {
        self.period
    }

    pub fn genesis_time(&self) -> u64 {
        self.genesis_time
    }

    /// Chain hash as declared by the packet.
    pub fn declared_hash(&self) -> &[u8] {
        &self.hash
    }

    pub fn scheme_id(&self) -> &str {
        &self.scheme_id
    }

    pub fn beacon_id(&self) -> &str {
        &self.beacon_id
    }

    /// Computes the chain hash from the chain parameters.
    pub fn hash(&self) -> [u8; 32] {
        let mut h = sha2::Sha256::new();
        h.update(self.period.get_value().to_be_bytes());
        h.update(self.genesis_time.to_be_bytes());
        h.update(&self.public_key);
        h.update(&self.group_hash);
        if !is_default_beacon_id(&self.beacon_id) {
            h.update(self.beacon_id.as_bytes());
        }

        h.finalize().into()
    }

    /// Checks the declared chain hash against the one computed from the chain parameters.
    pub fn verify_hash(&self) -> Result<(), ChainError> {
        let computed = self.hash();
        if self.hash != computed {
            error!(
                "ChainInfo: [{}]: chain hash mismatch",
                self.beacon_id_or_default()
            );
            return Err(ChainError::HashMismatch {
                declared: hex::encode(&self.hash),
                computed: hex::encode(computed),
            });
        }

        Ok(())
    }

    /// Checks the chain against trusted parameters. Empty parameters are not checked.
    pub fn check_parity(&self, params: &ChainVerificationParams) -> Result<(), ChainError> {
        if !params.chain_hash.is_empty() && params.chain_hash != self.hash {
            return Err(ChainError::ParityMismatch {
                field: "chain hash",
                expected: hex::encode(&params.chain_hash),
                received: hex::encode(&self.hash),
            });
        }
        if !params.public_key.is_empty() && params.public_key != self.public_key {
            return Err(ChainError::ParityMismatch {
                field: "public key",
                expected: hex::encode(&params.public_key),
                received: hex::encode(&self.public_key),
            });
        }

        Ok(())
    }

    /// Returns the latest round emitted at UNIX time `now`, 0 before genesis.
    pub fn round_at(&self, now: u64) -> u64 {
        time::current_round(now, self.period.get_value(), self.genesis_time)
    }

    pub fn current_round(&self) -> u64 {
        self.round_at(time::time_now().as_secs())
    }

    pub fn time_of_round(&self, round: u64) -> u64 {
        time::time_of_round(self.period.get_value(), self.genesis_time, round)
    }

    /// Whether `round` should have been emitted at UNIX time `now`.
    pub fn is_round_available(&self, round: u64, now: u64) -> bool {
        round <= self.round_at(now)
    }

    fn beacon_id_or_default(&self) -> &str {
        if is_default_beacon_id(&self.beacon_id) {
            DEFAULT_BEACON_ID
        } else {
            &self.beacon_id
        }
    }
}

impl TryFrom<&ChainInfoPacket> for ChainInfo {
    type Error = ChainError;

    fn try_from(packet: &ChainInfoPacket) -> Result<Self, Self::Error> {
        Self::from_packet(packet)
    }
}
