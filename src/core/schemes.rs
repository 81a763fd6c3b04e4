// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Beacon schemes and the classifier selecting a verification path.

use super::beacon::BeaconShape;
use super::beacon::RandomnessBeacon;
use crate::chain::ChainInfo;
use crate::crypto::DST_G1;
use crate::crypto::DST_G2;

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeId {
    /// Signatures on G2, message chained to the previous signature.
    PedersenBlsChained,
    /// Signatures on G2, message is the round only.
    PedersenBlsUnchained,
    /// Signatures on G1. Messages are hashed to G1 with the G2 domain tag.
    UnchainedOnG1,
    /// Signatures on G1, RFC 9380 compliant domain tag.
    UnchainedOnG1Rfc9380,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scheme: {0}")]
pub struct UnknownScheme(pub String);

impl SchemeId {
    pub const ALL: [SchemeId; 4] = [
        SchemeId::PedersenBlsChained,
        SchemeId::PedersenBlsUnchained,
        SchemeId::UnchainedOnG1,
        SchemeId::UnchainedOnG1Rfc9380,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeId::PedersenBlsChained => "pedersen-bls-chained",
            SchemeId::PedersenBlsUnchained => "pedersen-bls-unchained",
            SchemeId::UnchainedOnG1 => "bls-unchained-on-g1",
            SchemeId::UnchainedOnG1Rfc9380 => "bls-unchained-g1-rfc9380",
        }
    }

    pub fn list_schemes() -> Vec<String> {
        Self::ALL.iter().map(|s| s.as_str().into()).collect()
    }

    pub fn is_chained(&self) -> bool {
        matches!(self, SchemeId::PedersenBlsChained)
    }
}

impl FromStr for SchemeId {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

impl std::fmt::Display for SchemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    #[error("beacon scheme {0} is not supported")]
    UnknownScheme(String),
    #[error("{shape} beacon does not belong to a {scheme} chain")]
    ShapeMismatch { scheme: SchemeId, shape: BeaconShape },
}

/// Verification path for a beacon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Signature on G2 over `sha256(previous_signature || round)`.
    Chained,
    /// Signature on G2 over `sha256(round)`.
    UnchainedG2,
    /// Signature on G1 over `sha256(round)`, message hashed to G1 with `dst`.
    UnchainedSwappedG1 { dst: &'static [u8] },
    Unsupported(UnsupportedReason),
}

/// Selects the verification path from the chain scheme, cross-checked against the beacon shape.
///
/// A previous signature is only required by the chained scheme. Unchained G2
/// beacons carrying one are verified as unchained.
pub fn classify(beacon: &RandomnessBeacon, info: &ChainInfo) -> Classification {
    let scheme = match SchemeId::from_str(info.scheme_id()) {
        Ok(scheme) => scheme,
        Err(UnknownScheme(id)) => {
            return Classification::Unsupported(UnsupportedReason::UnknownScheme(id))
        }
    };
    let shape = beacon.shape();

    match (scheme, shape) {
        (SchemeId::PedersenBlsChained, BeaconShape::Chained) => Classification::Chained,
        (SchemeId::PedersenBlsUnchained, BeaconShape::UnchainedG2 | BeaconShape::Chained) => {
            Classification::UnchainedG2
        }
        (SchemeId::UnchainedOnG1, BeaconShape::UnchainedG1) => {
            Classification::UnchainedSwappedG1 { dst: DST_G2 }
        }
        (SchemeId::UnchainedOnG1Rfc9380, BeaconShape::UnchainedG1) => {
            Classification::UnchainedSwappedG1 { dst: DST_G1 }
        }
        (scheme, shape) => {
            Classification::Unsupported(UnsupportedReason::ShapeMismatch { scheme, shape })
        }
    }
}
