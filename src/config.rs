//! Runtime configuration.
//!
//! Settings come from environment variables so the CLI and embedding
//! services share one source of truth.

use serde::{Deserialize, Serialize};

use crate::domain::LookupMissPolicy;
use crate::{Result, RiskcalcError};

/// Environment variable selecting the lookup miss policy.
pub const LOOKUP_MISS_ENV: &str = "RISKCALC_LOOKUP_MISS";

/// Calculator settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// How factor values outside every band are scored
    pub lookup_miss: LookupMissPolicy,
}

impl CalculatorConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns `Config` if a variable is set to an unrecognized value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable source.
    ///
    /// # Errors
    /// Returns `Config` if a variable is set to an unrecognized value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup_miss = match lookup(LOOKUP_MISS_ENV) {
            Some(v) if !v.trim().is_empty() => v.parse::<LookupMissPolicy>().map_err(|_| {
                RiskcalcError::Config(format!(
                    "{LOOKUP_MISS_ENV}={v:?} is not one of reject, zero, clamp"
                ))
            })?,
            _ => LookupMissPolicy::default(),
        };

        Ok(Self { lookup_miss })
    }

    #[must_use]
    pub fn with_lookup_miss(mut self, policy: LookupMissPolicy) -> Self {
        self.lookup_miss = policy;
        self
    }
}
