// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

use super::ChainVerificationParams;
use super::VerificationOptions;

use anyhow::bail;
use anyhow::Result;
use toml::Table;
use toml::Value;

/// Create Map<String, Value> from (key:&str, value:Value), requires Into<Value> for each value
macro_rules! map {
    ($($key:literal : $value:expr),* $(,)?) => {
        {
            let kv = [$(($key.to_string(), $value.into())),*];
            IntoIterator::into_iter(kv).collect::<Table>()
        }
    };
}

/// Get value by $key:&str, define resulting type of value by $method
macro_rules! get {
    ($map:expr, $key:literal, $method:ident) => {
        $map.get($key)
            .and_then(|v| v.$method())
            .ok_or_else(|| anyhow::anyhow!(concat!("Expected ", $key)))
    };
}

pub trait IntoToml: Sized {
    fn to_value(&self) -> Value;

    fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(&self.to_value())?)
    }
}

pub trait FromToml: Sized {
    fn from_value(value: &Value) -> Result<Self>;

    fn from_toml(toml: &str) -> Result<Self> {
        Self::from_value(&toml::from_str(toml)?)
    }
}

impl IntoToml for ChainVerificationParams {
    fn to_value(&self) -> Value {
        let map = map! {
            "chain_hash": hex::encode(&self.chain_hash),
            "public_key": hex::encode(&self.public_key),
        };
        Value::Table(map)
    }
}

impl FromToml for ChainVerificationParams {
    fn from_value(value: &Value) -> Result<Self> {
        let chain_hash = hex::decode(get!(value, "chain_hash", as_str)?)?;
        let public_key = hex::decode(get!(value, "public_key", as_str)?)?;
        if chain_hash.is_empty() || public_key.is_empty() {
            bail!("chain_verification: chain_hash and public_key must not be empty")
        }

        Ok(Self {
            chain_hash,
            public_key,
        })
    }
}

impl IntoToml for VerificationOptions {
    fn to_value(&self) -> Value {
        let mut map = map! {
            "disable_beacon_verification": self.disable_beacon_verification,
        };
        if let Some(params) = &self.chain_verification {
            map.insert("chain_verification".to_string(), params.to_value());
        }
        Value::Table(map)
    }
}

impl FromToml for VerificationOptions {
    /// Missing keys fall back to the secure defaults.
    fn from_value(value: &Value) -> Result<Self> {
        let disable_beacon_verification = match value.get("disable_beacon_verification") {
            Some(_) => get!(value, "disable_beacon_verification", as_bool)?,
            None => false,
        };
        let chain_verification = value
            .get("chain_verification")
            .map(ChainVerificationParams::from_value)
            .transpose()?;

        Ok(Self {
            disable_beacon_verification,
            chain_verification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::vectors::*;

    #[test]
    fn options_toml() {
        let options = VerificationOptions {
            disable_beacon_verification: false,
            chain_verification: Some(ChainVerificationParams {
                chain_hash: hex::decode(MAINNET_CHAIN_HASH).unwrap(),
                public_key: hex::decode(MAINNET_PUBLIC_KEY).unwrap(),
            }),
        };
        let toml = options.to_toml().unwrap();
        assert!(toml.contains("[chain_verification]"));
        assert!(toml.contains(MAINNET_CHAIN_HASH));
        assert_eq!(VerificationOptions::from_toml(&toml).unwrap(), options);
    }

    #[test]
    fn secure_defaults() {
        let options = VerificationOptions::from_toml("").unwrap();
        assert_eq!(options, VerificationOptions::default());
        assert!(!options.disable_beacon_verification);

        let options = VerificationOptions::from_toml("disable_beacon_verification = true").unwrap();
        assert!(options.disable_beacon_verification);
        assert!(options.chain_verification.is_none());
    }

    #[test]
    fn malformed() {
        assert!(VerificationOptions::from_toml("disable_beacon_verification = \"yes\"").is_err());
        assert!(VerificationOptions::from_toml("[chain_verification]\nchain_hash = \"00\"").is_err());
        assert!(VerificationOptions::from_toml(
            "[chain_verification]\nchain_hash = \"zz\"\npublic_key = \"00\""
        )
        .is_err());
    }

    #[test]
    fn empty_pinned_parameters() {
        let key = format!("[chain_verification]\nchain_hash = \"\"\npublic_key = \"{MAINNET_PUBLIC_KEY}\"");
        assert!(VerificationOptions::from_toml(&key).is_err());

        let hash = format!("[chain_verification]\nchain_hash = \"{MAINNET_CHAIN_HASH}\"\npublic_key = \"\"");
        assert!(VerificationOptions::from_toml(&hash).is_err());

        assert!(VerificationOptions::from_toml(
            "[chain_verification]\nchain_hash = \"\"\npublic_key = \"\""
        )
        .is_err());
    }
}
