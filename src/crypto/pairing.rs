// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pairing map over BLS12-381 and the native signature check, where the
//! public key lives on G1 and the signature on G2.

use super::points::decode_g2;
use super::points::decode_public_key_g1;
use super::points::hash_to_g2;
use super::CryptoError;

use ark_bls12_381::Bls12_381;
use ark_bls12_381::G1Affine;
use ark_bls12_381::G2Affine;
use ark_ec::pairing::MillerLoopOutput;
use ark_ec::pairing::Pairing;
use ark_ec::pairing::PairingOutput;
use ark_ec::AffineRepr;
use ark_ff::One;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingError {
    #[error("final exponentiation of a zero miller loop value")]
    DegenerateMillerLoop,
    #[error("final exponentiation applied twice")]
    AlreadyExponentiated,
    #[error("target values must be final exponentiated before comparison")]
    NotExponentiated,
    #[error("can not multiply a miller loop value with a target value")]
    MixedStages,
}

/// Output of the pairing map, tagged by whether final exponentiation was applied.
///
/// Only [`PairingValue::Target`] values are comparable: two Miller loop values of
/// equal pairings are in general different field elements.
#[derive(Debug, Clone)]
pub enum PairingValue {
    MillerLoop(MillerLoopOutput<Bls12_381>),
    Target(PairingOutput<Bls12_381>),
}

impl PairingValue {
    /// Multiplication in the target field, both operands must be at the same stage.
    pub fn mul(self, other: Self) -> Result<Self, PairingError> {
        match (self, other) {
            (Self::MillerLoop(a), Self::MillerLoop(b)) => {
                Ok(Self::MillerLoop(MillerLoopOutput(a.0 * b.0)))
            }
            (Self::Target(a), Self::Target(b)) => Ok(Self::Target(PairingOutput(a.0 * b.0))),
            _ => Err(PairingError::MixedStages),
        }
    }

    pub fn target_eq(&self, other: &Self) -> Result<bool, PairingError> {
        match (self, other) {
            (Self::Target(a), Self::Target(b)) => Ok(a == b),
            _ => Err(PairingError::NotExponentiated),
        }
    }
}

/// Computes the Miller loop of `(a, b)`, followed by final exponentiation if requested.
pub fn pairing(
    a: G1Affine,
    b: G2Affine,
    final_exponentiate: bool,
) -> Result<PairingValue, PairingError> {
    let looped = PairingValue::MillerLoop(Bls12_381::miller_loop(a, b));
    if final_exponentiate {
        self::final_exponentiate(looped)
    } else {
        Ok(looped)
    }
}

pub fn final_exponentiate(value: PairingValue) -> Result<PairingValue, PairingError> {
    match value {
        PairingValue::MillerLoop(looped) => Bls12_381::final_exponentiation(looped)
            .map(PairingValue::Target)
            .ok_or(PairingError::DegenerateMillerLoop),
        PairingValue::Target(_) => Err(PairingError::AlreadyExponentiated),
    }
}

/// Returns whether `value` is the multiplicative identity of the target field.
pub fn is_identity(value: &PairingValue) -> Result<bool, PairingError> {
    match value {
        PairingValue::Target(target) => Ok(target.0.is_one()),
        PairingValue::MillerLoop(_) => Err(PairingError::NotExponentiated),
    }
}

/// Checks `e(pk, H(m)) == e(g1, sig)` for a G1 public key and a G2 signature.
pub fn verify_sig_on_g2(
    signature: &[u8],
    message: &[u8],
    public_key: &[u8],
    dst: &[u8],
) -> Result<bool, CryptoError> {
    let key = decode_public_key_g1(public_key)?;
    let sig = decode_g2(signature)?;
    let hm = hash_to_g2(message, dst)?;

    let lhs = pairing(key, hm, true)?;
    let rhs = pairing(G1Affine::generator(), sig, true)?;

    Ok(lhs.target_eq(&rhs)?)
}
