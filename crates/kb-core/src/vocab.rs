//! Closed vocabularies for items, puzzles, story flags, and locations.
//!
//! Every identifier the engine can store is declared here. Keys are stable
//! snake_case strings so content and configuration can refer to them by
//! name; parsing an unknown key fails with [`CoreError::UnknownKey`], which
//! the string-keyed state operations turn into a no-op.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident : $kind:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($key:literal, $display:literal),
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every member of the vocabulary, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The stable snake_case key.
            pub fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// The player-facing name.
            pub fn display_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $display,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key() == key)
                    .ok_or_else(|| CoreError::UnknownKey {
                        kind: $kind,
                        key: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }
    };
}

vocabulary! {
    /// An item the player can hold. Presence only, never stacked.
    Item: "item" {
        /// Opens the old house once the door puzzle is solved.
        RustyKey => ("rusty_key", "Rusty Key"),
        /// A torn note from the village hall; doubles as the map.
        TatteredNote => ("tattered_note", "Tattered Note"),
        /// Lights the way into the cave.
        Torch => ("torch", "Old Torch"),
        /// Negates an enemy attack when defending.
        ProtectiveCharm => ("protective_charm", "Protective Charm"),
        /// The only weapon in the fog.
        OldKnife => ("old_knife", "Old Knife"),
        /// First of the three artifacts, pulled from the swamp.
        ForestArtifact => ("forest_artifact", "Forest Artifact"),
        /// Second artifact, guarded by the shadow in the ruins.
        RuinsArtifact => ("ruins_artifact", "Ruins Artifact"),
        /// The journal describing the ritual.
        RitualJournal => ("ritual_journal", "Ritual Journal"),
        /// Third artifact, the source of the light in the cave.
        CoreArtifact => ("core_artifact", "Core Artifact"),
    }
}

vocabulary! {
    /// A puzzle that can be completed once.
    Puzzle: "puzzle" {
        /// Ordering the stones on the forest path.
        StoneSymbols => ("stone_symbols", "Stone Symbols"),
        /// Pressing the right symbol on the old house door.
        DoorSymbol => ("door_symbol", "Door Symbol"),
        /// Reading the cycle of dates under the bell.
        AncientScript => ("ancient_script", "Ancient Script"),
    }
}

vocabulary! {
    /// A monotonic narrative milestone.
    StoryFlag: "flag" {
        /// The elder admitted the player's memory was taken.
        MemoryStirring => ("memory_stirring", "Memory Stirring"),
        /// The player has learned what the ritual is.
        KnowsRitual => ("knows_ritual", "Knows the Ritual"),
        /// The player has seen their own name among the chosen.
        KnowsNameOnWall => ("knows_name_on_wall", "Knows the Name on the Wall"),
        /// The player has stood before the dweller.
        MetEntity => ("met_entity", "Met the Dweller"),
        /// The seal was strengthened.
        RitualReinforced => ("ritual_reinforced", "Ritual Reinforced"),
        /// The seal was broken.
        RitualDestroyed => ("ritual_destroyed", "Ritual Destroyed"),
        /// Establishing narration for the village has played.
        VillageFirstVisit => ("village_first_visit", "Village Introduced"),
        /// Establishing narration for the forest has played.
        ForestFirstVisit => ("forest_first_visit", "Forest Introduced"),
        /// Establishing narration for the ruins has played.
        RuinsFirstVisit => ("ruins_first_visit", "Ruins Introduced"),
        /// Establishing narration for the cave has played.
        CaveFirstVisit => ("cave_first_visit", "Cave Introduced"),
    }
}

vocabulary! {
    /// A location recorded in the visited set.
    Location: "location" {
        /// The forgotten village.
        Village => ("village", "Forgotten Village"),
        /// The locked house at the edge of the village.
        OldHouse => ("old_house", "Old House"),
        /// The bottomless dry well.
        Well => ("well", "Dry Well"),
        /// The bell that rings by itself.
        BellTower => ("bell_tower", "Bell Tower"),
        /// The misty forest to the west.
        Forest => ("forest", "Misty Forest"),
        /// The ancient ruins to the south.
        Ruins => ("ruins", "Ancient Ruins"),
        /// The forbidden cave underground.
        Cave => ("cave", "Forbidden Cave"),
        /// The heart of the mystery.
        Core => ("core", "Heart of the Mystery"),
    }
}

/// Which of the four stores a fact lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    /// Inventory items.
    Item,
    /// Completed puzzles.
    Puzzle,
    /// Story flags.
    Flag,
    /// Visited locations.
    Visited,
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Puzzle => write!(f, "puzzle"),
            Self::Flag => write!(f, "flag"),
            Self::Visited => write!(f, "visited"),
        }
    }
}

/// A single boolean fact about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Fact {
    /// An item is held.
    Item(Item),
    /// A puzzle is completed.
    Puzzle(Puzzle),
    /// A story flag is set.
    Flag(StoryFlag),
    /// A location has been entered.
    Visited(Location),
}

impl Fact {
    /// The store this fact belongs to.
    pub fn kind(self) -> FactKind {
        match self {
            Self::Item(_) => FactKind::Item,
            Self::Puzzle(_) => FactKind::Puzzle,
            Self::Flag(_) => FactKind::Flag,
            Self::Visited(_) => FactKind::Visited,
        }
    }

    /// Resolve a string key within a store.
    pub fn parse(kind: FactKind, key: &str) -> Result<Self, CoreError> {
        Ok(match kind {
            FactKind::Item => Self::Item(key.parse()?),
            FactKind::Puzzle => Self::Puzzle(key.parse()?),
            FactKind::Flag => Self::Flag(key.parse()?),
            FactKind::Visited => Self::Visited(key.parse()?),
        })
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(i) => write!(f, "item {}", i.key()),
            Self::Puzzle(p) => write!(f, "puzzle {}", p.key()),
            Self::Flag(s) => write!(f, "flag {}", s.key()),
            Self::Visited(l) => write!(f, "visited {}", l.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_sizes() {
        assert_eq!(Item::ALL.len(), 9);
        assert_eq!(Puzzle::ALL.len(), 3);
        assert_eq!(StoryFlag::ALL.len(), 10);
        assert_eq!(Location::ALL.len(), 8);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Old_Knife".parse::<Item>().unwrap(), Item::OldKnife);
        assert_eq!(" door_symbol ".parse::<Puzzle>().unwrap(), Puzzle::DoorSymbol);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "golden_crown".parse::<Item>().unwrap_err();
        assert!(err.to_string().contains("golden_crown"));
        assert!(err.to_string().contains("item"));
    }

    #[test]
    fn fact_parse_by_kind() {
        assert_eq!(
            Fact::parse(FactKind::Flag, "knows_ritual").unwrap(),
            Fact::Flag(StoryFlag::KnowsRitual)
        );
        assert!(Fact::parse(FactKind::Puzzle, "knows_ritual").is_err());
    }

    #[test]
    fn fact_display_uses_keys() {
        assert_eq!(Fact::Item(Item::Torch).to_string(), "item torch");
        assert_eq!(Fact::Visited(Location::Core).to_string(), "visited core");
    }
}
