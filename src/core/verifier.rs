// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Beacon verification pipeline.
//!
//! Every outcome caused by the input, including malformed points and unknown
//! schemes, resolves to a [`Verdict`]. [`VerifierError`] is reserved for failures
//! of the verifier itself, so a caller can tell an invalid beacon from a broken
//! verifier.

use super::beacon::BeaconError;
use super::beacon::BeaconPacket;
use super::beacon::RandomnessBeacon;
use super::message::chained_message;
use super::message::unchained_message;
use super::randomness::check_randomness;
use super::schemes::classify;
use super::schemes::Classification;
use super::schemes::UnsupportedReason;
use crate::chain::ChainInfo;
use crate::config::VerificationOptions;
use crate::crypto::verify_sig_on_g1;
use crate::crypto::verify_sig_on_g2;
use crate::crypto::CryptoError;
use crate::crypto::PairingError;
use crate::crypto::PointError;
use crate::crypto::DST_G2;

use tracing::debug;
use tracing::error;
use tracing::warn;

/// Reason for rejecting a beacon.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("the randomness for the beacon did not match the signature")]
    RandomnessMismatch,
    #[error(transparent)]
    UnsupportedScheme(UnsupportedReason),
    #[error("malformed point: {0}")]
    MalformedPoint(PointError),
    #[error("malformed beacon: {0}")]
    MalformedBeacon(BeaconError),
    #[error("signature verification failed")]
    InvalidSignature,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Human readable reason of a rejection.
    pub fn reason(&self) -> Option<String> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(rejection) => Some(rejection.to_string()),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("accepted"),
            Verdict::Rejected(rejection) => write!(f, "rejected: {rejection}"),
        }
    }
}

/// Internal failure of the verifier, never caused by beacon contents.
#[derive(thiserror::Error, Debug)]
pub enum VerifierError {
    #[error("hash to curve: {0}")]
    HashToCurve(String),
    #[error("pairing: {0}")]
    Pairing(#[from] PairingError),
}

/// Verifies a beacon against the chain it claims to belong to.
///
/// Verification is a pure function of its inputs: no state is kept between calls.
pub fn verify_beacon(
    beacon: &RandomnessBeacon,
    info: &ChainInfo,
    options: &VerificationOptions,
) -> Result<Verdict, VerifierError> {
    let round = beacon.round();
    if options.disable_beacon_verification {
        warn!("beacon verification is disabled, accepting round {round} unchecked");
        return Ok(Verdict::Accepted);
    }

    if !check_randomness(beacon) {
        debug!("round {round}: randomness does not match signature {}", beacon.short_sig());
        return Ok(Verdict::Rejected(Rejection::RandomnessMismatch));
    }

    let (signature_ok, path) = match classify(beacon, info) {
        Classification::Chained => {
            // Shape was checked by the classifier.
            let prev = beacon.previous_signature().unwrap_or_default();
            let msg = chained_message(round, prev);
            (
                verify_sig_on_g2(beacon.signature(), &msg, info.public_key(), DST_G2),
                "chained",
            )
        }
        Classification::UnchainedG2 => {
            let msg = unchained_message(round);
            (
                verify_sig_on_g2(beacon.signature(), &msg, info.public_key(), DST_G2),
                "unchained",
            )
        }
        Classification::UnchainedSwappedG1 { dst } => {
            let msg = unchained_message(round);
            (
                verify_sig_on_g1(beacon.signature(), &msg, info.public_key(), dst),
                "unchained-g1",
            )
        }
        Classification::Unsupported(reason) => {
            error!("round {round}: {reason}");
            return Ok(Verdict::Rejected(Rejection::UnsupportedScheme(reason)));
        }
    };

    match signature_ok {
        Ok(true) => {
            debug!("round {round}: {path} signature {} is valid", beacon.short_sig());
            Ok(Verdict::Accepted)
        }
        Ok(false) => {
            debug!("round {round}: {path} signature {} is invalid", beacon.short_sig());
            Ok(Verdict::Rejected(Rejection::InvalidSignature))
        }
        Err(CryptoError::Point(err)) => {
            debug!("round {round}: {err}");
            Ok(Verdict::Rejected(Rejection::MalformedPoint(err)))
        }
        Err(CryptoError::HashToCurve(err)) => Err(VerifierError::HashToCurve(err)),
        Err(CryptoError::Pairing(err)) => Err(VerifierError::Pairing(err)),
    }
}

/// Same as [`verify_beacon`], taking the beacon as received from a relay.
pub fn verify_packet(
    packet: &BeaconPacket,
    info: &ChainInfo,
    options: &VerificationOptions,
) -> Result<Verdict, VerifierError> {
    if options.disable_beacon_verification {
        warn!("beacon verification is disabled, accepting round {} unchecked", packet.round);
        return Ok(Verdict::Accepted);
    }

    match RandomnessBeacon::from_packet_for_chain(packet, info) {
        Ok(beacon) => verify_beacon(&beacon, info, options),
        Err(err) => {
            debug!("round {}: {err}", packet.round);
            Ok(Verdict::Rejected(Rejection::MalformedBeacon(err)))
        }
    }
}
