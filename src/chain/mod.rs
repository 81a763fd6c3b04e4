// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

mod info;
pub mod time;

pub use info::is_default_beacon_id;
pub use info::ChainError;
pub use info::ChainInfo;
pub use info::ChainInfoPacket;
pub use info::Metadata;
pub use info::DEFAULT_BEACON_ID;
pub use info::DEFAULT_SCHEME;
