//! Rules configuration.
//!
//! Numeric constants of the rules that embedders may tune per match.
//! Per-skill numbers (modifiers, costs, power damage) live in the skill
//! catalog instead.

use serde::{Deserialize, Serialize};

use super::entity::MAX_HEALTH;

/// Tunable rule constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Health ceiling applied when healing.
    pub max_health: u8,

    /// Health restored by a heal power.
    pub heal_amount: u8,

    /// Power Station cost while `UnlockPowerStation` is active.
    pub power_station_cost: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_health: MAX_HEALTH,
            heal_amount: 50,
            power_station_cost: 500,
        }
    }
}

impl RulesConfig {
    /// Create a config with custom heal amount.
    #[must_use]
    pub fn with_heal_amount(mut self, amount: u8) -> Self {
        self.heal_amount = amount;
        self
    }

    /// Create a config with custom maximum health.
    #[must_use]
    pub fn with_max_health(mut self, health: u8) -> Self {
        self.max_health = health;
        self
    }

    /// Create a config with custom Power Station cost.
    #[must_use]
    pub fn with_power_station_cost(mut self, cost: u32) -> Self {
        self.power_station_cost = cost;
        self
    }
}
