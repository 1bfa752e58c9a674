//! Effects that modify the session state.

use std::fmt;

use kb_core::{Fact, Item, Location, Puzzle, SessionState, StoryFlag};

/// A state mutation applied when a choice resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Give an item to the player.
    GiveItem(Item),
    /// Take an item from the player.
    TakeItem(Item),
    /// Raise a story flag.
    SetFlag(StoryFlag),
    /// Mark a puzzle completed.
    SolvePuzzle(Puzzle),
    /// Record a location as visited.
    MarkVisited(Location),
    /// Subtract health.
    Damage(u32),
}

impl Effect {
    /// Apply the effect. Returns a notice for the player when something
    /// they should see changed.
    pub fn apply(&self, state: &mut SessionState) -> Option<String> {
        match self {
            Effect::GiveItem(item) => state
                .set(Fact::Item(*item))
                .then(|| format!("You obtained: {}", item.display_name())),
            Effect::TakeItem(item) => state
                .unset(Fact::Item(*item))
                .then(|| format!("You no longer have: {}", item.display_name())),
            Effect::SetFlag(flag) => {
                state.set(Fact::Flag(*flag));
                None
            }
            Effect::SolvePuzzle(puzzle) => state
                .set(Fact::Puzzle(*puzzle))
                .then(|| format!("Solved: {}", puzzle.display_name())),
            Effect::MarkVisited(location) => {
                state.set(Fact::Visited(*location));
                None
            }
            Effect::Damage(amount) => {
                let health = state.damage(*amount);
                Some(format!("You take {amount} damage! Health: {health}"))
            }
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::GiveItem(item) => write!(f, "+{}", item.key()),
            Effect::TakeItem(item) => write!(f, "-{}", item.key()),
            Effect::SetFlag(flag) => write!(f, "flag {}", flag.key()),
            Effect::SolvePuzzle(puzzle) => write!(f, "solve {}", puzzle.key()),
            Effect::MarkVisited(location) => write!(f, "visit {}", location.key()),
            Effect::Damage(amount) => write!(f, "-{amount} hp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn give_item_notices_once() {
        let mut state = SessionState::new();
        let effect = Effect::GiveItem(Item::Torch);

        assert_eq!(
            effect.apply(&mut state).as_deref(),
            Some("You obtained: Old Torch")
        );
        assert_eq!(effect.apply(&mut state), None);
        assert!(state.has_item(Item::Torch));
    }

    #[test]
    fn take_item_removes() {
        let mut state = SessionState::new();
        Effect::GiveItem(Item::OldKnife).apply(&mut state);
        assert!(Effect::TakeItem(Item::OldKnife).apply(&mut state).is_some());
        assert!(!state.has_item(Item::OldKnife));
        assert_eq!(Effect::TakeItem(Item::OldKnife).apply(&mut state), None);
    }

    #[test]
    fn damage_reports_health() {
        let mut state = SessionState::new();
        let notice = Effect::Damage(20).apply(&mut state);
        assert_eq!(notice.as_deref(), Some("You take 20 damage! Health: 80"));
    }

    #[test]
    fn flags_are_silent() {
        let mut state = SessionState::new();
        assert_eq!(Effect::SetFlag(StoryFlag::KnowsRitual).apply(&mut state), None);
        assert!(state.has_flag(StoryFlag::KnowsRitual));
    }

    #[test]
    fn display() {
        assert_eq!(Effect::GiveItem(Item::RustyKey).to_string(), "+rusty_key");
        assert_eq!(Effect::Damage(15).to_string(), "-15 hp");
    }
}
