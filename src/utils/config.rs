// Politique de routage fixée à la construction du routeur

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::types::INFINITE_METRIC;

/// Default route lifetime in seconds.
pub const ROUTE_TTL_SEC: u64 = 15;

/// Immutable per-node policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Lifetime of a learned route, in seconds.
    pub route_ttl: u64,
    pub split_horizon: bool,
    pub poison_reverse: bool,
    pub poison_expired: bool,
    pub advertise_on_link_up: bool,
    pub poison_on_link_down: bool,
    /// Cost ceiling; any latency at or above it is unreachable.
    pub infinity: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            route_ttl: ROUTE_TTL_SEC,
            split_horizon: false,
            poison_reverse: false,
            poison_expired: false,
            advertise_on_link_up: false,
            poison_on_link_down: false,
            infinity: INFINITE_METRIC,
        }
    }
}

impl RouterConfig {
    /// Every loop-mitigation feature on, with poison reverse rather than split horizon.
    pub fn full_mitigation() -> Self {
        RouterConfig {
            poison_reverse: true,
            poison_expired: true,
            advertise_on_link_up: true,
            poison_on_link_down: true,
            ..RouterConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.split_horizon && self.poison_reverse {
            return Err(AppError::ConfigError(
                "split_horizon and poison_reverse cannot both be enabled".to_string(),
            ));
        }
        if self.infinity == 0 {
            return Err(AppError::ConfigError("infinity must be greater than zero".to_string()));
        }
        Ok(())
    }
}
