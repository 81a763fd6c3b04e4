// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Signature check for chains publishing signatures on G1 and the group key on G2.
//!
//! The pairing map takes its first argument in G1 and its second in G2, so the
//! equation `e(S, g2) == e(H(m), P)` is rearranged as `e(S, g2) * e(H(m), -P) == 1`.
//! Both Miller loops then share a single final exponentiation.

use super::pairing::final_exponentiate;
use super::pairing::is_identity;
use super::pairing::pairing;
use super::points::decode_g1;
use super::points::decode_public_key_g2;
use super::points::hash_to_g1;
use super::points::negate_g2;
use super::CryptoError;

use ark_bls12_381::G2Affine;
use ark_ec::AffineRepr;

pub fn verify_sig_on_g1(
    signature: &[u8],
    message: &[u8],
    public_key: &[u8],
    dst: &[u8],
) -> Result<bool, CryptoError> {
    let p = decode_public_key_g2(public_key)?;
    let hm = hash_to_g1(message, dst)?;
    let s = decode_g1(signature)?;

    let e_hm = pairing(hm, negate_g2(&p), false)?;
    let e_s = pairing(s, G2Affine::generator(), false)?;
    let product = final_exponentiate(e_s.mul(e_hm)?)?;

    Ok(is_identity(&product)?)
}

/// Same check evaluated as two full pairings, `e(S, g2) == e(H(m), P)`.
pub fn verify_sig_on_g1_two_pairings(
    signature: &[u8],
    message: &[u8],
    public_key: &[u8],
    dst: &[u8],
) -> Result<bool, CryptoError> {
    let p = decode_public_key_g2(public_key)?;
    let hm = hash_to_g1(message, dst)?;
    let s = decode_g1(signature)?;

    let lhs = pairing(s, G2Affine::generator(), true)?;
    let rhs = pairing(hm, p, true)?;

    Ok(lhs.target_eq(&rhs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::unchained_message;
    use crate::crypto::points::encode_g1;
    use crate::crypto::points::encode_g2;
    use crate::crypto::PointError;
    use crate::crypto::DST_G1;
    use crate::crypto::DST_G2;
    use crate::test::vectors::*;

    use ark_bls12_381::Fr;
    use ark_bls12_381::G1Affine;
    use ark_ec::CurveGroup;

    fn both(sig: &[u8], msg: &[u8], pk: &[u8], dst: &[u8]) -> (bool, bool) {
        (
            verify_sig_on_g1(sig, msg, pk, dst).unwrap(),
            verify_sig_on_g1_two_pairings(sig, msg, pk, dst).unwrap(),
        )
    }

    #[test]
    fn quicknet_round_verifies() {
        let pk = hex::decode(QUICKNET_PUBLIC_KEY).unwrap();
        let sig = hex::decode(QUICKNET_SIGNATURE).unwrap();
        let msg = unchained_message(QUICKNET_ROUND);

        assert_eq!(both(&sig, &msg, &pk, DST_G1), (true, true));
    }

    #[test]
    fn conventions_agree_on_rejection() {
        let pk = hex::decode(QUICKNET_PUBLIC_KEY).unwrap();
        let sig = hex::decode(QUICKNET_SIGNATURE).unwrap();

        // Wrong round.
        let msg = unchained_message(QUICKNET_ROUND + 1);
        assert_eq!(both(&sig, &msg, &pk, DST_G1), (false, false));

        // Wrong domain separation tag.
        let msg = unchained_message(QUICKNET_ROUND);
        assert_eq!(both(&sig, &msg, &pk, DST_G2), (false, false));

        // Valid signature of another round.
        let other = hash_to_g1(&unchained_message(7), DST_G1).unwrap();
        let other = encode_g1(&other).unwrap();
        assert_eq!(both(&other, &msg, &pk, DST_G1), (false, false));
    }

    #[test]
    fn conventions_agree_on_synthetic_keys() {
        let sk = Fr::from(0x5eed_u64);
        let pk = encode_g2(&(G2Affine::generator() * sk).into_affine()).unwrap();

        for round in [1u64, 1000, u64::MAX] {
            let msg = unchained_message(round);
            let hm = hash_to_g1(&msg, DST_G1).unwrap();
            let sig = encode_g1(&(hm * sk).into_affine()).unwrap();
            assert_eq!(both(&sig, &msg, &pk, DST_G1), (true, true));

            let forged = encode_g1(&(hm * (sk + Fr::from(1u64))).into_affine()).unwrap();
            assert_eq!(both(&forged, &msg, &pk, DST_G1), (false, false));
        }
    }

    #[test]
    fn identity_signature_does_not_verify() {
        let pk = hex::decode(QUICKNET_PUBLIC_KEY).unwrap();
        let sig = encode_g1(&G1Affine::zero()).unwrap();
        let msg = unchained_message(QUICKNET_ROUND);

        assert_eq!(both(&sig, &msg, &pk, DST_G1), (false, false));
    }

    #[test]
    fn malformed_points_are_reported() {
        let pk = hex::decode(QUICKNET_PUBLIC_KEY).unwrap();
        let sig = hex::decode(QUICKNET_SIGNATURE).unwrap();
        let msg = unchained_message(QUICKNET_ROUND);

        let identity = encode_g2(&G2Affine::zero()).unwrap();
        assert!(matches!(
            verify_sig_on_g1(&sig, &msg, &identity, DST_G1),
            Err(CryptoError::Point(PointError::Identity(_)))
        ));
        assert!(matches!(
            verify_sig_on_g1(&sig, &msg, &[], DST_G1),
            Err(CryptoError::Point(PointError::Length { .. }))
        ));
        assert!(matches!(
            verify_sig_on_g1(&pk, &msg, &pk, DST_G1),
            Err(CryptoError::Point(PointError::Length { .. }))
        ));
    }
}
