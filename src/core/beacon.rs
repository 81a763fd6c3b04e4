// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Beacon representations.
//!
//! [`BeaconPacket`] mirrors the JSON served by drand relays at `/public/<round>`.
//! [`RandomnessBeacon`] is the validated form consumed by the verifier: every field
//! required by its variant is present and decoded, so shape errors are reported
//! when the beacon is built rather than in the middle of verification.

use super::message::round_from_number;
use super::message::InvalidRound;
use super::schemes::SchemeId;
use crate::chain::ChainInfo;
use crate::crypto::points::G1_COMPRESSED_SIZE;
use crate::crypto::points::G2_COMPRESSED_SIZE;

use serde::Deserialize;
use serde::Serialize;

/// Raw beacon as returned by the HTTP API, all byte fields hex encoded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BeaconPacket {
    pub round: serde_json::Number,
    pub randomness: String,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_signature: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BeaconError {
    #[error("{field}: malformed hex: {source}")]
    MalformedHex {
        field: &'static str,
        source: hex::FromHexError,
    },
    #[error(transparent)]
    InvalidRound(#[from] InvalidRound),
    #[error("round 0 is the genesis seed and carries no signature")]
    GenesisRound,
    #[error("signature can not be empty")]
    EmptySignature,
    #[error("signature of {0} bytes is neither a G1 (48) nor a G2 (96) point")]
    SignatureLength(usize),
}

/// Beacon of a chained scheme: the signed message includes the previous signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedBeacon {
    round: u64,
    signature: Vec<u8>,
    previous_signature: Vec<u8>,
    randomness: Vec<u8>,
}

/// Beacon of an unchained scheme: the signed message depends on the round only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnchainedBeacon {
    round: u64,
    signature: Vec<u8>,
    randomness: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomnessBeacon {
    Chained(ChainedBeacon),
    /// Unchained, signature on G2.
    Unchained(UnchainedBeacon),
    /// Unchained, signature on G1 and group key on G2.
    UnchainedG1(UnchainedBeacon),
}

/// Structural kind of a beacon, independent of the chain it claims to belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconShape {
    Chained,
    UnchainedG2,
    UnchainedG1,
}

impl std::fmt::Display for BeaconShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BeaconShape::Chained => "chained (G2 signature)",
            BeaconShape::UnchainedG2 => "unchained (G2 signature)",
            BeaconShape::UnchainedG1 => "unchained (G1 signature)",
        };
        f.write_str(s)
    }
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, BeaconError> {
    hex::decode(value).map_err(|source| BeaconError::MalformedHex { field, source })
}

impl RandomnessBeacon {
    /// Builds a beacon from decoded fields, without knowledge of the chain scheme.
    ///
    /// The signature length selects the group. A G1 signature is always unchained.
    /// A G2 signature with a non-empty previous signature is taken as chained.
    pub fn from_parts(
        round: u64,
        signature: Vec<u8>,
        previous_signature: Option<Vec<u8>>,
        randomness: Vec<u8>,
    ) -> Result<Self, BeaconError> {
        Self::for_scheme(round, signature, previous_signature, randomness, None)
    }

    /// Same as [`RandomnessBeacon::from_parts`], resolving G2 beacons with the scheme
    /// when it is known: a previous signature makes a beacon chained only on a chained
    /// scheme. Unchained beacons drop the previous signature whatever their group.
    pub fn for_scheme(
        round: u64,
        signature: Vec<u8>,
        previous_signature: Option<Vec<u8>>,
        randomness: Vec<u8>,
        scheme: Option<SchemeId>,
    ) -> Result<Self, BeaconError> {
        if round == 0 {
            return Err(BeaconError::GenesisRound);
        }
        if signature.is_empty() {
            return Err(BeaconError::EmptySignature);
        }

        let previous_signature = previous_signature.filter(|prev| !prev.is_empty());
        let chained = scheme.map_or(true, |scheme| scheme.is_chained());
        let unchained = |signature, randomness| UnchainedBeacon {
            round,
            signature,
            randomness,
        };

        match (signature.len(), previous_signature) {
            (G1_COMPRESSED_SIZE, _) => Ok(Self::UnchainedG1(unchained(signature, randomness))),
            (G2_COMPRESSED_SIZE, Some(previous_signature)) if chained => {
                Ok(Self::Chained(ChainedBeacon {
                    round,
                    signature,
                    previous_signature,
                    randomness,
                }))
            }
            (G2_COMPRESSED_SIZE, _) => Ok(Self::Unchained(unchained(signature, randomness))),
            (len, _) => Err(BeaconError::SignatureLength(len)),
        }
    }

    pub fn from_packet(packet: &BeaconPacket) -> Result<Self, BeaconError> {
        Self::packet_for_scheme(packet, None)
    }

    /// Decodes a packet for the chain it claims to belong to. Unknown schemes fall
    /// back to the structural rules of [`RandomnessBeacon::from_parts`].
    pub fn from_packet_for_chain(
        packet: &BeaconPacket,
        info: &ChainInfo,
    ) -> Result<Self, BeaconError> {
        Self::packet_for_scheme(packet, info.scheme_id().parse().ok())
    }

    fn packet_for_scheme(
        packet: &BeaconPacket,
        scheme: Option<SchemeId>,
    ) -> Result<Self, BeaconError> {
        let round = round_from_number(&packet.round)?;
        let signature = decode_hex("signature", &packet.signature)?;
        let randomness = decode_hex("randomness", &packet.randomness)?;
        let previous_signature = packet
            .previous_signature
            .as_deref()
            .map(|prev| decode_hex("previous_signature", prev))
            .transpose()?;

        Self::for_scheme(round, signature, previous_signature, randomness, scheme)
    }

    pub fn as_packet(&self) -> BeaconPacket {
        BeaconPacket {
            round: self.round().into(),
            randomness: hex::encode(self.randomness()),
            signature: hex::encode(self.signature()),
            previous_signature: self.previous_signature().map(hex::encode),
        }
    }

    pub fn round(&self) -> u64 {
        match self {
            Self::Chained(b) => b.round,
            Self::Unchained(b) | Self::UnchainedG1(b) => b.round,
        }
    }

    pub fn signature(&self) -> &[u8] {
        match self {
            Self::Chained(b) => &b.signature,
            Self::Unchained(b) | Self::UnchainedG1(b) => &b.signature,
        }
    }

    pub fn randomness(&self) -> &[u8] {
        match self {
            Self::Chained(b) => &b.randomness,
            Self::Unchained(b) | Self::UnchainedG1(b) => &b.randomness,
        }
    }

    pub fn previous_signature(&self) -> Option<&[u8]> {
        match self {
            Self::Chained(b) => Some(&b.previous_signature),
            Self::Unchained(_) | Self::UnchainedG1(_) => None,
        }
    }

    pub fn shape(&self) -> BeaconShape {
        match self {
            Self::Chained(_) => BeaconShape::Chained,
            Self::Unchained(_) => BeaconShape::UnchainedG2,
            Self::UnchainedG1(_) => BeaconShape::UnchainedG1,
        }
    }

    pub fn short_sig(&self) -> String {
        hex::encode(self.signature().get(..3).unwrap_or_default())
    }
}

impl TryFrom<&BeaconPacket> for RandomnessBeacon {
    type Error = BeaconError;

    fn try_from(packet: &BeaconPacket) -> Result<Self, Self::Error> {
        Self::from_packet(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::vectors::*;

    fn packet(json: &str) -> BeaconPacket {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn shapes_from_json() {
        let chained = RandomnessBeacon::from_packet(&testnet_chained_packet()).unwrap();
        assert_eq!(chained.shape(), BeaconShape::Chained);
        assert_eq!(chained.round(), TESTNET_CHAINED_ROUND);
        assert_eq!(
            chained.previous_signature().map(hex::encode).as_deref(),
            Some(TESTNET_CHAINED_PREVIOUS_SIGNATURE)
        );

        let unchained = RandomnessBeacon::from_packet(&testnet_unchained_packet()).unwrap();
        assert_eq!(unchained.shape(), BeaconShape::UnchainedG2);
        assert_eq!(unchained.previous_signature(), None);

        let g1 = RandomnessBeacon::from_packet(&quicknet_packet()).unwrap();
        assert_eq!(g1.shape(), BeaconShape::UnchainedG1);
        assert_eq!(hex::encode(g1.signature()), QUICKNET_SIGNATURE);
        assert_eq!(hex::encode(g1.randomness()), QUICKNET_RANDOMNESS);
    }

    #[test]
    fn empty_previous_signature_is_absent() {
        let mut p = testnet_unchained_packet();
        p.previous_signature = Some(String::new());
        let beacon = RandomnessBeacon::from_packet(&p).unwrap();
        assert_eq!(beacon.shape(), BeaconShape::UnchainedG2);
    }

    #[test]
    fn g1_beacon_drops_previous_signature() {
        let mut p = quicknet_packet();
        p.previous_signature = Some(QUICKNET_SIGNATURE.into());

        for beacon in [
            RandomnessBeacon::from_packet(&p).unwrap(),
            RandomnessBeacon::from_packet_for_chain(&p, &quicknet_info()).unwrap(),
        ] {
            assert_eq!(beacon.shape(), BeaconShape::UnchainedG1);
            assert_eq!(beacon.previous_signature(), None);
            assert_eq!(beacon.as_packet(), quicknet_packet());
        }
    }

    #[test]
    fn g2_shape_follows_the_scheme() {
        let mut p = testnet_unchained_packet();
        p.previous_signature = Some(TESTNET_CHAINED_PREVIOUS_SIGNATURE.into());

        let unchained_info = chain_info(TESTNET_UNCHAINED_PUBLIC_KEY, "pedersen-bls-unchained");
        let beacon = RandomnessBeacon::from_packet_for_chain(&p, &unchained_info).unwrap();
        assert_eq!(beacon.shape(), BeaconShape::UnchainedG2);
        assert_eq!(beacon.previous_signature(), None);

        let chained_info = chain_info(TESTNET_CHAINED_PUBLIC_KEY, "pedersen-bls-chained");
        let beacon = RandomnessBeacon::from_packet_for_chain(&p, &chained_info).unwrap();
        assert_eq!(beacon.shape(), BeaconShape::Chained);

        // Unknown schemes keep the structural reading.
        let unknown_info = chain_info(TESTNET_UNCHAINED_PUBLIC_KEY, "bls-unchained-on-g3");
        let beacon = RandomnessBeacon::from_packet_for_chain(&p, &unknown_info).unwrap();
        assert_eq!(beacon.shape(), BeaconShape::Chained);

        // A chained scheme without previous signature stays unchained, the classifier rejects it.
        let beacon =
            RandomnessBeacon::from_packet_for_chain(&testnet_unchained_packet(), &chained_info)
                .unwrap();
        assert_eq!(beacon.shape(), BeaconShape::UnchainedG2);
    }

    #[test]
    fn packet_round_trip() {
        for p in [
            testnet_chained_packet(),
            testnet_unchained_packet(),
            quicknet_packet(),
        ] {
            let beacon = RandomnessBeacon::try_from(&p).unwrap();
            assert_eq!(beacon.as_packet(), p);
        }
    }

    #[test]
    fn construction_errors() {
        let p = packet(r#"{"round": 0, "randomness": "00", "signature": "00"}"#);
        assert_eq!(
            RandomnessBeacon::from_packet(&p),
            Err(BeaconError::GenesisRound)
        );

        let p = packet(r#"{"round": -3, "randomness": "00", "signature": "00"}"#);
        assert!(matches!(
            RandomnessBeacon::from_packet(&p),
            Err(BeaconError::InvalidRound(_))
        ));

        let p = packet(r#"{"round": 99999999999999999999, "randomness": "00", "signature": "00"}"#);
        assert!(matches!(
            RandomnessBeacon::from_packet(&p),
            Err(BeaconError::InvalidRound(_))
        ));

        let p = packet(r#"{"round": 1, "randomness": "00", "signature": "zz"}"#);
        assert!(matches!(
            RandomnessBeacon::from_packet(&p),
            Err(BeaconError::MalformedHex {
                field: "signature",
                ..
            })
        ));

        let p = packet(r#"{"round": 1, "randomness": "00", "signature": ""}"#);
        assert_eq!(
            RandomnessBeacon::from_packet(&p),
            Err(BeaconError::EmptySignature)
        );

        let p = packet(r#"{"round": 1, "randomness": "00", "signature": "0011"}"#);
        assert_eq!(
            RandomnessBeacon::from_packet(&p),
            Err(BeaconError::SignatureLength(2))
        );

        let mut p = testnet_chained_packet();
        p.previous_signature = Some("0g".into());
        assert!(matches!(
            RandomnessBeacon::from_packet(&p),
            Err(BeaconError::MalformedHex {
                field: "previous_signature",
                ..
            })
        ));
    }
}
