// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Verifier configuration, stored as TOML.
//!
//! ```toml
//! disable_beacon_verification = false
//!
//! [chain_verification]
//! chain_hash = "8990e7a9aaed2ffed73dbd7092123d6f289930540d7651336225dc172e51b2ce"
//! public_key = "868f005eb8e6e4ca0a47c8a77ceaa5309a47978a7c71bc5cce96366b5d7a569937c529eeda66c7293784a9402801af31"
//! ```

mod toml;

pub use self::toml::FromToml;
pub use self::toml::IntoToml;

use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_FOLDER: &str = ".drand-verifier";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not locate home directory")]
    NoHome,
    #[error("config: {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config: {path}: {source}")]
    Parse {
        path: PathBuf,
        source: anyhow::Error,
    },
}

/// Trusted chain parameters compared against a chain info before any beacon is verified.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChainVerificationParams {
    pub chain_hash: Vec<u8>,
    pub public_key: Vec<u8>,
}

/// Options of a verification session. [`Default`] is the secure configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerificationOptions {
    /// Accepts every beacon without any check. Testing only.
    pub disable_beacon_verification: bool,
    pub chain_verification: Option<ChainVerificationParams>,
}

impl VerificationOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_toml(&toml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("config: loaded {}", path.display());

        Ok(options)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let toml = self.to_toml().map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, toml).map_err(io_err)?;
        debug!("config: saved {}", path.display());

        Ok(())
    }
}

/// Returns `~/.drand-verifier/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    home::home_dir()
        .map(|home| home.join(DEFAULT_FOLDER).join(CONFIG_FILE))
        .ok_or(ConfigError::NoHome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load() {
        let dir = std::env::temp_dir().join(format!("drand-verifier-{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE);

        let options = VerificationOptions {
            disable_beacon_verification: true,
            chain_verification: Some(ChainVerificationParams {
                chain_hash: vec![1; 32],
                public_key: vec![2; 48],
            }),
        };
        options.save(&path).unwrap();
        assert_eq!(VerificationOptions::load(&path).unwrap(), options);

        std::fs::write(&path, "disable_beacon_verification = 1").unwrap();
        assert!(matches!(
            VerificationOptions::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(
            VerificationOptions::load(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn default_path_is_under_home() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with(Path::new(DEFAULT_FOLDER).join(CONFIG_FILE)));
        }
    }
}
