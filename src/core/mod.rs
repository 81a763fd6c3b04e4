// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

pub mod beacon;
pub mod message;
pub mod randomness;
pub mod schemes;
pub mod verifier;

pub use beacon::BeaconPacket;
pub use beacon::RandomnessBeacon;
pub use schemes::SchemeId;
pub use verifier::verify_beacon;
pub use verifier::verify_packet;
pub use verifier::Verdict;
pub use verifier::VerifierError;
