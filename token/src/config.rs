//! Token configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use vtk_ledger::GenesisConfig;
use vtk_types::{AccountId, Amount, TokenParams, DEFAULT_DISCARD_AFTER_SECS, DEFAULT_TOTAL_SUPPLY};
use vtk_utils::LogFormat;

use crate::TokenError;

/// Configuration for a voting token.
///
/// Can be loaded from a TOML file via [`TokenConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Ticker symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Display decimals. Balances are always stored in raw units.
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Fixed total supply in raw units, minted once to `owner`.
    #[serde(default = "default_total_supply")]
    pub total_supply: u64,

    /// The deployer account.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Seconds after which an undecided proposal counts as discarded.
    #[serde(default = "default_discard_after_secs")]
    pub discard_after_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_name() -> String {
    "VotingToken".to_string()
}

fn default_symbol() -> String {
    "VTK".to_string()
}

fn default_decimals() -> u8 {
    6
}

fn default_total_supply() -> u64 {
    DEFAULT_TOTAL_SUPPLY as u64
}

fn default_owner() -> String {
    "owner".to_string()
}

fn default_discard_after_secs() -> u64 {
    DEFAULT_DISCARD_AFTER_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl TokenConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TokenError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TokenError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, TokenError> {
        toml::from_str(s).map_err(|e| TokenError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, TokenError> {
        toml::to_string_pretty(self).map_err(|e| TokenError::Config(e.to_string()))
    }

    /// Check the values a token cannot be created from.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.total_supply == 0 {
            return Err(TokenError::Config("total_supply must be non-zero".into()));
        }
        if self.discard_after_secs == 0 {
            return Err(TokenError::Config("discard_after_secs must be non-zero".into()));
        }
        self.owner_id()?;
        Ok(())
    }

    pub fn owner_id(&self) -> Result<AccountId, TokenError> {
        AccountId::parse(&self.owner).map_err(|e| TokenError::Config(e.to_string()))
    }

    pub fn params(&self) -> TokenParams {
        TokenParams {
            total_supply: Amount::from(self.total_supply),
            discard_after_secs: self.discard_after_secs,
        }
    }

    pub fn genesis(&self) -> Result<GenesisConfig, TokenError> {
        Ok(GenesisConfig::new(self.owner_id()?, Amount::from(self.total_supply)))
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            total_supply: default_total_supply(),
            owner: default_owner(),
            discard_after_secs: default_discard_after_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
