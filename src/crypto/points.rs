// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compressed point (de)serialization, negation and hash-to-curve for G1 and G2.

use super::CryptoError;

use ark_bls12_381::g1;
use ark_bls12_381::g2;
use ark_bls12_381::G1Affine;
use ark_bls12_381::G1Projective;
use ark_bls12_381::G2Affine;
use ark_bls12_381::G2Projective;
use ark_ec::hashing::curve_maps::wb::WBMap;
use ark_ec::hashing::map_to_curve_hasher::MapToCurveBasedHasher;
use ark_ec::hashing::HashToCurve;
use ark_ec::AffineRepr;
use ark_ff::field_hashers::DefaultFieldHasher;
use ark_serialize::CanonicalDeserialize;
use ark_serialize::CanonicalSerialize;
use sha2::Sha256;

/// Size of a compressed G1 point.
pub const G1_COMPRESSED_SIZE: usize = 48;
/// Size of a compressed G2 point.
pub const G2_COMPRESSED_SIZE: usize = 96;

type G1Hasher = MapToCurveBasedHasher<G1Projective, DefaultFieldHasher<Sha256, 128>, WBMap<g1::Config>>;
type G2Hasher = MapToCurveBasedHasher<G2Projective, DefaultFieldHasher<Sha256, 128>, WBMap<g2::Config>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subgroup {
    G1,
    G2,
}

impl Subgroup {
    pub fn compressed_size(self) -> usize {
        match self {
            Subgroup::G1 => G1_COMPRESSED_SIZE,
            Subgroup::G2 => G2_COMPRESSED_SIZE,
        }
    }
}

impl std::fmt::Display for Subgroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subgroup::G1 => f.write_str("G1"),
            Subgroup::G2 => f.write_str("G2"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PointError {
    #[error("{group}: expected {expected} bytes, received {received}")]
    Length {
        group: Subgroup,
        expected: usize,
        received: usize,
    },
    #[error("{0}: bytes are not a valid compressed point in the prime order subgroup")]
    Invalid(Subgroup),
    #[error("{0}: public key can not be the identity point")]
    Identity(Subgroup),
    #[error("{0}: failed to serialize point")]
    Encoding(Subgroup),
}

fn check_length(bytes: &[u8], group: Subgroup) -> Result<(), PointError> {
    let expected = group.compressed_size();
    if bytes.len() != expected {
        return Err(PointError::Length {
            group,
            expected,
            received: bytes.len(),
        });
    }
    Ok(())
}

/// Decodes a compressed G1 point. Curve and subgroup membership are checked.
pub fn decode_g1(bytes: &[u8]) -> Result<G1Affine, PointError> {
    check_length(bytes, Subgroup::G1)?;
    G1Affine::deserialize_compressed(bytes).map_err(|_| PointError::Invalid(Subgroup::G1))
}

/// Decodes a compressed G2 point. Curve and subgroup membership are checked.
pub fn decode_g2(bytes: &[u8]) -> Result<G2Affine, PointError> {
    check_length(bytes, Subgroup::G2)?;
    G2Affine::deserialize_compressed(bytes).map_err(|_| PointError::Invalid(Subgroup::G2))
}

/// Public keys on G1 must additionally differ from the identity.
pub fn decode_public_key_g1(bytes: &[u8]) -> Result<G1Affine, PointError> {
    let key = decode_g1(bytes)?;
    if key.is_zero() {
        return Err(PointError::Identity(Subgroup::G1));
    }
    Ok(key)
}

/// Public keys on G2 must additionally differ from the identity.
pub fn decode_public_key_g2(bytes: &[u8]) -> Result<G2Affine, PointError> {
    let key = decode_g2(bytes)?;
    if key.is_zero() {
        return Err(PointError::Identity(Subgroup::G2));
    }
    Ok(key)
}

pub fn encode_g1(point: &G1Affine) -> Result<Vec<u8>, PointError> {
    let mut bytes = Vec::with_capacity(G1_COMPRESSED_SIZE);
    point
        .serialize_compressed(&mut bytes)
        .map_err(|_| PointError::Encoding(Subgroup::G1))?;
    Ok(bytes)
}

pub fn encode_g2(point: &G2Affine) -> Result<Vec<u8>, PointError> {
    let mut bytes = Vec::with_capacity(G2_COMPRESSED_SIZE);
    point
        .serialize_compressed(&mut bytes)
        .map_err(|_| PointError::Encoding(Subgroup::G2))?;
    Ok(bytes)
}

pub fn negate_g1(point: &G1Affine) -> G1Affine {
    -*point
}

pub fn negate_g2(point: &G2Affine) -> G2Affine {
    -*point
}

/// Hashes `message` to G1 using `BLS12381G1_XMD:SHA-256_SSWU_RO_` with the given tag.
pub fn hash_to_g1(message: &[u8], dst: &[u8]) -> Result<G1Affine, CryptoError> {
    let hasher = G1Hasher::new(dst).map_err(|e| CryptoError::HashToCurve(format!("{e:?}")))?;
    hasher
        .hash(message)
        .map_err(|e| CryptoError::HashToCurve(format!("{e:?}")))
}

/// Hashes `message` to G2 using `BLS12381G2_XMD:SHA-256_SSWU_RO_` with the given tag.
pub fn hash_to_g2(message: &[u8], dst: &[u8]) -> Result<G2Affine, CryptoError> {
    let hasher = G2Hasher::new(dst).map_err(|e| CryptoError::HashToCurve(format!("{e:?}")))?;
    hasher
        .hash(message)
        .map_err(|e| CryptoError::HashToCurve(format!("{e:?}")))
}
