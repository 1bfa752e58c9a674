//! Session configuration.

use kb_core::STARTING_HEALTH;
use kb_mechanics::CombatConfig;
use serde::{Deserialize, Serialize};

/// Settings for one play session.
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Health at the start of the session.
    pub starting_health: i32,
    /// Seed for combat draws. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Combat tuning.
    pub combat: CombatConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_health: STARTING_HEALTH,
            seed: None,
            combat: CombatConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting health.
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the combat tuning.
    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.starting_health, 100);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.combat.recovery_health, 50);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_seed(7)
            .with_starting_health(40)
            .with_combat(CombatConfig::default().with_recovery_health(25));
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.starting_health, 40);
        assert_eq!(cfg.combat.recovery_health, 25);
    }

    #[test]
    fn partial_json() {
        let cfg: SessionConfig =
            serde_json::from_str(r#"{"seed": 42, "combat": {"recovery_health": 30}}"#).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.starting_health, 100);
        assert_eq!(cfg.combat.recovery_health, 30);
        assert_eq!(cfg.combat.retaliation, CombatConfig::default().retaliation);
    }
}
