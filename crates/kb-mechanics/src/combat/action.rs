//! Combat actions and event logging.

use std::fmt;

use serde::Serialize;

/// What the player can do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatAction {
    /// Strike the foe, with the weapon if held.
    Attack,
    /// Raise the charm against the foe's next blow.
    DefendWithCharm,
    /// Break off the fight at once.
    Flee,
    /// Take a smaller hit on purpose.
    Brace,
}

impl CombatAction {
    /// The menu, in the order it is offered.
    pub const ALL: [Self; 4] = [Self::Attack, Self::DefendWithCharm, Self::Flee, Self::Brace];

    /// Menu label for this action.
    pub fn label(self) -> &'static str {
        match self {
            Self::Attack => "Attack (with the knife, if you have it)",
            Self::DefendWithCharm => "Hold up the charm for protection",
            Self::Flee => "Try to run",
            Self::Brace => "Brace yourself",
        }
    }
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::DefendWithCharm => write!(f, "Defend with charm"),
            Self::Flee => write!(f, "Flee"),
            Self::Brace => write!(f, "Brace"),
        }
    }
}

/// Something that happened during a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEventKind {
    /// The player hit the foe.
    PlayerStrike {
        /// Damage dealt.
        damage: u32,
        /// Whether the weapon was used.
        armed: bool,
    },
    /// The charm will turn aside the foe's next blow.
    CharmRaised,
    /// The player reached for a charm they do not have.
    CharmMissing {
        /// Damage taken.
        damage: u32,
    },
    /// The player braced and absorbed a hit.
    Braced {
        /// Damage taken.
        damage: u32,
    },
    /// The player ran.
    Fled,
    /// The foe hit the player.
    FoeStrike {
        /// Damage taken.
        damage: u32,
    },
    /// The foe's blow was turned aside.
    FoeWarded,
    /// The foe collapsed.
    FoeFell,
    /// The player collapsed and woke again.
    PlayerFell {
        /// Health after waking.
        recovered_to: i32,
    },
}

/// A recorded combat event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatEvent {
    /// Which round this happened in (1-based).
    pub round: u32,
    /// What happened.
    pub kind: CombatEventKind,
}

impl CombatEvent {
    /// Narrate the event against a named foe.
    pub fn describe(&self, foe: &str) -> String {
        match &self.kind {
            CombatEventKind::PlayerStrike { damage, armed: true } => {
                format!("You slash with the knife! Damage: {damage}")
            }
            CombatEventKind::PlayerStrike {
                damage,
                armed: false,
            } => format!("You strike with your bare hands! Damage: {damage}"),
            CombatEventKind::CharmRaised => {
                "The charm glows. Its warmth wraps around you.".to_string()
            }
            CombatEventKind::CharmMissing { damage } => {
                format!("You have no charm! You take {damage} damage!")
            }
            CombatEventKind::Braced { damage } => {
                format!("You hold your ground and absorb {damage} damage.")
            }
            CombatEventKind::Fled => "You run!".to_string(),
            CombatEventKind::FoeStrike { damage } => {
                format!("The {foe} attacks! Damage: {damage}")
            }
            CombatEventKind::FoeWarded => {
                format!("The {foe} lunges, but the charm turns it aside.")
            }
            CombatEventKind::FoeFell => format!("The {foe} dissolves back into the fog."),
            CombatEventKind::PlayerFell { .. } => "You fall. Your sight fades.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_order() {
        assert_eq!(CombatAction::ALL[0], CombatAction::Attack);
        assert_eq!(CombatAction::ALL[2], CombatAction::Flee);
        assert!(CombatAction::Attack.label().contains("knife"));
    }

    #[test]
    fn combat_action_display() {
        assert_eq!(CombatAction::Attack.to_string(), "Attack");
        assert_eq!(CombatAction::DefendWithCharm.to_string(), "Defend with charm");
        assert_eq!(CombatAction::Flee.to_string(), "Flee");
        assert_eq!(CombatAction::Brace.to_string(), "Brace");
    }

    #[test]
    fn events_name_the_foe() {
        let event = CombatEvent {
            round: 2,
            kind: CombatEventKind::FoeStrike { damage: 12 },
        };
        assert_eq!(event.describe("Shadow"), "The Shadow attacks! Damage: 12");
    }

    #[test]
    fn strike_narration_depends_on_weapon() {
        let armed = CombatEvent {
            round: 1,
            kind: CombatEventKind::PlayerStrike {
                damage: 20,
                armed: true,
            },
        };
        let bare = CombatEvent {
            round: 1,
            kind: CombatEventKind::PlayerStrike {
                damage: 5,
                armed: false,
            },
        };
        assert!(armed.describe("Shadow").contains("knife"));
        assert!(bare.describe("Shadow").contains("bare hands"));
    }
}
