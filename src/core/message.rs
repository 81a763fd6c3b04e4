// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Messages signed by the beacon network for a given round.

use sha2::Digest;
use sha2::Sha256;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid round {0}: expected an unsigned 64-bit integer")]
pub struct InvalidRound(pub String);

/// Converts a JSON number into a round, rejecting negative, fractional and oversized values.
pub fn round_from_number(number: &serde_json::Number) -> Result<u64, InvalidRound> {
    number
        .as_u64()
        .ok_or_else(|| InvalidRound(number.to_string()))
}

/// Message for chained schemes: `sha256(previous_signature || round)`.
pub fn chained_message(round: u64, previous_signature: &[u8]) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(previous_signature);
    h.update(round.to_be_bytes());
    h.finalize().into()
}

/// Message for unchained schemes: `sha256(round)`. The group of the signature does not matter.
pub fn unchained_message(round: u64) -> [u8; 32] {
    Sha256::digest(round.to_be_bytes()).into()
}
