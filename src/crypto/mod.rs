// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! BLS12-381 primitives used by beacon verification.
//!
//! Points are decoded from their compressed encodings, messages are mapped to
//! the curve with the RFC 9380 suites and signatures are checked with pairings.
//! Nothing in this module performs I/O.

pub mod pairing;
pub mod points;
pub mod swapped;

pub use pairing::verify_sig_on_g2;
pub use pairing::PairingError;
pub use points::PointError;
pub use points::Subgroup;
pub use swapped::verify_sig_on_g1;

/// Domain separation tag for messages hashed to G1.
pub const DST_G1: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";
/// Domain separation tag for messages hashed to G2.
pub const DST_G2: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

#[derive(thiserror::Error, Debug)]
pub enum CryptoError {
    #[error(transparent)]
    Point(#[from] PointError),
    #[error("hash to curve: {0}")]
    HashToCurve(String),
    #[error(transparent)]
    Pairing(#[from] PairingError),
}
