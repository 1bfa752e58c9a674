//! Tuning for combat encounters.

use kb_core::Item;
use serde::{Deserialize, Serialize};

use crate::dice::DamageRange;

/// Damage ranges, the recovery value, and which items matter in a fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Attack damage while holding the weapon.
    pub armed_attack: DamageRange,
    /// Attack damage bare-handed.
    pub unarmed_attack: DamageRange,
    /// Damage taken when defending without the charm.
    pub charm_penalty: DamageRange,
    /// Damage absorbed when bracing.
    pub brace: DamageRange,
    /// Damage dealt by the foe each round it survives.
    pub retaliation: DamageRange,
    /// Health restored after a defeat.
    pub recovery_health: i32,
    /// Item that upgrades attacks.
    pub weapon: Item,
    /// Item that negates the foe's attack when defending.
    pub charm: Item,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            armed_attack: DamageRange::new(15, 30),
            unarmed_attack: DamageRange::new(5, 15),
            charm_penalty: DamageRange::new(10, 20),
            brace: DamageRange::new(5, 15),
            retaliation: DamageRange::new(10, 25),
            recovery_health: 50,
            weapon: Item::OldKnife,
            charm: Item::ProtectiveCharm,
        }
    }
}

impl CombatConfig {
    /// Set the health restored after a defeat.
    pub fn with_recovery_health(mut self, health: i32) -> Self {
        self.recovery_health = health;
        self
    }

    /// Set the foe's retaliation range.
    pub fn with_retaliation(mut self, range: DamageRange) -> Self {
        self.retaliation = range;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = CombatConfig::default();
        assert_eq!(cfg.armed_attack, DamageRange::new(15, 30));
        assert_eq!(cfg.unarmed_attack, DamageRange::new(5, 15));
        assert_eq!(cfg.recovery_health, 50);
        assert_eq!(cfg.weapon, Item::OldKnife);
        assert_eq!(cfg.charm, Item::ProtectiveCharm);
    }

    #[test]
    fn builder_methods() {
        let cfg = CombatConfig::default()
            .with_recovery_health(30)
            .with_retaliation(DamageRange::new(1, 2));
        assert_eq!(cfg.recovery_health, 30);
        assert_eq!(cfg.retaliation, DamageRange::new(1, 2));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: CombatConfig =
            serde_json::from_str(r#"{ "recovery_health": 40, "weapon": "torch" }"#).unwrap();
        assert_eq!(cfg.recovery_health, 40);
        assert_eq!(cfg.weapon, Item::Torch);
        assert_eq!(cfg.retaliation, DamageRange::new(10, 25));
    }
}
