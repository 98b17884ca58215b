//! Configuration loading and representation.

use core::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

pub const DEFAULT_AUTHORIZED_OVERDRAW_VAR: &str = "LEDGER_DEFAULT_AUTHORIZED_OVERDRAW";
pub const DEFAULT_MAX_BALANCE_VAR: &str = "LEDGER_DEFAULT_MAX_BALANCE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Defaults applied by the account service when opening accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Overdraw limit given to newly opened current accounts.
    pub default_authorized_overdraw: Decimal,
    /// Ceiling given to savings accounts opened without an explicit one.
    pub default_max_balance: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_authorized_overdraw: Decimal::ZERO,
            default_max_balance: Decimal::new(22_950, 0),
        }
    }
}

impl LedgerConfig {
    /// Load from process environment, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests, layered sources).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_authorized_overdraw = match lookup(DEFAULT_AUTHORIZED_OVERDRAW_VAR) {
            Some(raw) => parse_amount(DEFAULT_AUTHORIZED_OVERDRAW_VAR, &raw)?,
            None => {
                tracing::debug!(key = DEFAULT_AUTHORIZED_OVERDRAW_VAR, "not set; using default");
                defaults.default_authorized_overdraw
            }
        };
        if default_authorized_overdraw < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                key: DEFAULT_AUTHORIZED_OVERDRAW_VAR,
                message: "must be non-negative".to_string(),
            });
        }

        let default_max_balance = match lookup(DEFAULT_MAX_BALANCE_VAR) {
            Some(raw) => parse_amount(DEFAULT_MAX_BALANCE_VAR, &raw)?,
            None => {
                tracing::debug!(key = DEFAULT_MAX_BALANCE_VAR, "not set; using default");
                defaults.default_max_balance
            }
        };
        if default_max_balance <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                key: DEFAULT_MAX_BALANCE_VAR,
                message: "must be positive".to_string(),
            });
        }

        Ok(Self {
            default_authorized_overdraw,
            default_max_balance,
        })
    }
}

fn parse_amount(key: &'static str, raw: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        key,
        message: e.to_string(),
    })
}
