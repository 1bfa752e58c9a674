//! The mutable record of a play session.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::trace;

use crate::vocab::{Fact, FactKind, Item, Location, Puzzle, StoryFlag};

/// Health every new session starts with.
pub const STARTING_HEALTH: i32 = 100;

/// Health, inventory, and progress for a single play session.
///
/// Visited locations, completed puzzles, and story flags only ever grow.
/// Inventory items can be removed again. Health can drop to zero or below;
/// deciding what that means is left to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    health: i32,
    inventory: BTreeSet<Item>,
    visited: BTreeSet<Location>,
    completed_puzzles: BTreeSet<Puzzle>,
    story_flags: BTreeSet<StoryFlag>,
}

impl SessionState {
    /// Create a fresh session at full health with nothing held.
    pub fn new() -> Self {
        Self::with_health(STARTING_HEALTH)
    }

    /// Create a fresh session starting at the given health.
    pub fn with_health(health: i32) -> Self {
        Self {
            health,
            inventory: BTreeSet::new(),
            visited: BTreeSet::new(),
            completed_puzzles: BTreeSet::new(),
            story_flags: BTreeSet::new(),
        }
    }

    /// Current health. May be zero or negative.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// True while health is above zero.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Items currently held, in vocabulary order.
    pub fn inventory(&self) -> impl Iterator<Item = Item> + '_ {
        self.inventory.iter().copied()
    }

    /// Locations entered at least once.
    pub fn visited(&self) -> impl Iterator<Item = Location> + '_ {
        self.visited.iter().copied()
    }

    /// Puzzles completed so far.
    pub fn completed_puzzles(&self) -> impl Iterator<Item = Puzzle> + '_ {
        self.completed_puzzles.iter().copied()
    }

    /// Story flags raised so far.
    pub fn story_flags(&self) -> impl Iterator<Item = StoryFlag> + '_ {
        self.story_flags.iter().copied()
    }

    /// Check whether a fact holds.
    pub fn has(&self, fact: Fact) -> bool {
        match fact {
            Fact::Item(item) => self.inventory.contains(&item),
            Fact::Puzzle(puzzle) => self.completed_puzzles.contains(&puzzle),
            Fact::Flag(flag) => self.story_flags.contains(&flag),
            Fact::Visited(location) => self.visited.contains(&location),
        }
    }

    /// Record a fact. Returns true if it was not already recorded.
    pub fn set(&mut self, fact: Fact) -> bool {
        let added = match fact {
            Fact::Item(item) => self.inventory.insert(item),
            Fact::Puzzle(puzzle) => self.completed_puzzles.insert(puzzle),
            Fact::Flag(flag) => self.story_flags.insert(flag),
            Fact::Visited(location) => self.visited.insert(location),
        };
        if added {
            trace!(%fact, "fact set");
        }
        added
    }

    /// Remove an inventory item. Returns true if it was held.
    ///
    /// Puzzles, flags, and visits are never removed; for those this is a
    /// no-op returning false.
    pub fn unset(&mut self, fact: Fact) -> bool {
        match fact {
            Fact::Item(item) => {
                let removed = self.inventory.remove(&item);
                if removed {
                    trace!(%fact, "fact unset");
                }
                removed
            }
            other => {
                trace!(fact = %other, "ignoring unset of a monotonic fact");
                false
            }
        }
    }

    /// String-keyed [`has`](Self::has). Unknown keys are never held.
    pub fn has_key(&self, kind: FactKind, key: &str) -> bool {
        Fact::parse(kind, key).is_ok_and(|fact| self.has(fact))
    }

    /// String-keyed [`set`](Self::set). Unknown keys are ignored.
    pub fn set_key(&mut self, kind: FactKind, key: &str) -> bool {
        match Fact::parse(kind, key) {
            Ok(fact) => self.set(fact),
            Err(err) => {
                trace!(%err, "ignoring set");
                false
            }
        }
    }

    /// String-keyed [`unset`](Self::unset). Unknown keys are ignored.
    pub fn unset_key(&mut self, kind: FactKind, key: &str) -> bool {
        match Fact::parse(kind, key) {
            Ok(fact) => self.unset(fact),
            Err(err) => {
                trace!(%err, "ignoring unset");
                false
            }
        }
    }

    /// Check whether an item is held.
    pub fn has_item(&self, item: Item) -> bool {
        self.has(Fact::Item(item))
    }

    /// Check whether a puzzle is completed.
    pub fn is_solved(&self, puzzle: Puzzle) -> bool {
        self.has(Fact::Puzzle(puzzle))
    }

    /// Check whether a story flag is raised.
    pub fn has_flag(&self, flag: StoryFlag) -> bool {
        self.has(Fact::Flag(flag))
    }

    /// Subtract damage and return the resulting health, unclamped.
    pub fn damage(&mut self, amount: u32) -> i32 {
        self.health = self.health.saturating_sub_unsigned(amount);
        trace!(amount, health = self.health, "damage applied");
        self.health
    }

    /// Put health back at a fixed recovery value after a non-fatal defeat.
    ///
    /// This is the only way health goes up.
    pub fn revive(&mut self, recovery: i32) -> i32 {
        trace!(from = self.health, to = recovery, "revived");
        self.health = recovery;
        self.health
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
