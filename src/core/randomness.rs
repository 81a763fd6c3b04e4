// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

use super::beacon::RandomnessBeacon;

use sha2::Digest;
use sha2::Sha256;

/// Randomness published with a beacon is the SHA-256 digest of its signature.
pub fn derive_randomness(signature: &[u8]) -> [u8; 32] {
    Sha256::digest(signature).into()
}

/// Returns false if the declared randomness does not match the signature.
pub fn check_randomness(beacon: &RandomnessBeacon) -> bool {
    derive_randomness(beacon.signature()).as_slice() == beacon.randomness()
}
