//! Configuration for the retroactive pay module

use serde::{Deserialize, Serialize};

/// Scale of stored money columns; finer rounding would be lost on write
pub const MAX_CURRENCY_PRECISION: u32 = 4;

/// Retroactive pay module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Decimal places adjustment amounts are rounded to
    #[serde(default = "default_currency_precision")]
    pub currency_precision: u32,

    /// Symbol used when rendering fixed-amount increases
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Upper bound on rows a single generate run may produce
    #[serde(default = "default_max_rows_per_generation")]
    pub max_rows_per_generation: usize,

    /// Refuse to regenerate calculations of an approved configuration
    #[serde(default = "default_true")]
    pub enforce_draft_only_regeneration: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_precision: default_currency_precision(),
            currency_symbol: default_currency_symbol(),
            max_rows_per_generation: default_max_rows_per_generation(),
            enforce_draft_only_regeneration: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.currency_precision > MAX_CURRENCY_PRECISION {
            anyhow::bail!(
                "retro_pay.currency_precision must be at most {}, got {}",
                MAX_CURRENCY_PRECISION,
                self.currency_precision
            );
        }
        if self.max_rows_per_generation == 0 {
            anyhow::bail!("retro_pay.max_rows_per_generation must be at least 1");
        }
        Ok(())
    }
}

fn default_currency_precision() -> u32 {
    2
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_max_rows_per_generation() -> usize {
    100_000
}

fn default_true() -> bool {
    true
}
