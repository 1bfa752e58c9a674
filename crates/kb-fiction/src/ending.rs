//! Endings and the resolver that admits them.

use std::collections::BTreeMap;
use std::fmt;

use kb_core::{Item, Puzzle, SessionState, StoryFlag};
use serde::Serialize;
use tracing::debug;

use crate::choice::{Condition, Effect};
use crate::content::endings;

/// One of the four mutually exclusive endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// Strengthen the seal and become its final anchor.
    Reinforce,
    /// Break the seal and let the dweller out.
    Release,
    /// Walk away and leave the cycle to the next chosen one.
    Abstain,
    /// Rewrite the ritual. Needs everything gathered.
    Transcend,
}

impl Ending {
    /// Every ending, in menu order.
    pub const ALL: [Self; 4] = [Self::Reinforce, Self::Release, Self::Abstain, Self::Transcend];

    /// The stable snake_case key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Reinforce => "reinforce",
            Self::Release => "release",
            Self::Abstain => "abstain",
            Self::Transcend => "transcend",
        }
    }

    /// The ending's title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Reinforce => "Sacrifice for Safety",
            Self::Release => "The Gate Opens",
            Self::Abstain => "Fate Deferred",
            Self::Transcend => "Breaking the Cycle",
        }
    }

    /// The closing narration.
    pub fn narration(self) -> &'static str {
        match self {
            Self::Reinforce => endings::REINFORCE,
            Self::Release => endings::RELEASE,
            Self::Abstain => endings::ABSTAIN,
            Self::Transcend => endings::TRANSCEND,
        }
    }

    /// State changes recorded when the ending is reached.
    pub fn effects(self) -> Vec<Effect> {
        match self {
            Self::Reinforce => vec![Effect::SetFlag(StoryFlag::RitualReinforced)],
            Self::Release => vec![Effect::SetFlag(StoryFlag::RitualDestroyed)],
            Self::Abstain | Self::Transcend => Vec::new(),
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// What the resolver decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndingOutcome {
    /// The ending happens.
    Reached(Ending),
    /// The precondition failed; the player is sent back to choose again.
    Rejected {
        /// The ending that was attempted.
        ending: Ending,
        /// The sub-conditions that did not hold.
        unmet: Vec<Condition>,
    },
}

/// Decides whether a selected ending is admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndingResolver {
    requirements: BTreeMap<Ending, Condition>,
}

impl EndingResolver {
    /// A resolver with no preconditions on any ending.
    pub fn unconstrained() -> Self {
        Self {
            requirements: BTreeMap::new(),
        }
    }

    /// The story's resolver: only Transcend has a precondition.
    ///
    /// Transcend needs all three artifacts held together, the stone and
    /// door puzzles completed, and health above zero.
    pub fn standard() -> Self {
        Self::unconstrained().require(
            Ending::Transcend,
            Condition::And(vec![
                Condition::HasItem(Item::ForestArtifact),
                Condition::HasItem(Item::RuinsArtifact),
                Condition::HasItem(Item::CoreArtifact),
                Condition::PuzzleSolved(Puzzle::StoneSymbols),
                Condition::PuzzleSolved(Puzzle::DoorSymbol),
                Condition::HealthAbove(0),
            ]),
        )
    }

    /// Attach a precondition to an ending.
    pub fn require(mut self, ending: Ending, condition: Condition) -> Self {
        self.requirements.insert(ending, condition);
        self
    }

    /// The precondition on an ending. Unconstrained endings get `Always`.
    pub fn requirement(&self, ending: Ending) -> Condition {
        self.requirements.get(&ending).cloned().unwrap_or_default()
    }

    /// Resolve a selected ending against the current state.
    pub fn resolve(&self, ending: Ending, state: &SessionState) -> EndingOutcome {
        let requirement = self.requirement(ending);
        if requirement.evaluate(state) {
            debug!(ending = ending.key(), "ending reached");
            return EndingOutcome::Reached(ending);
        }
        let unmet: Vec<Condition> = requirement
            .conjuncts()
            .iter()
            .filter(|c| !c.evaluate(state))
            .cloned()
            .collect();
        debug!(ending = ending.key(), unmet = unmet.len(), "ending rejected");
        EndingOutcome::Rejected { ending, unmet }
    }
}

impl Default for EndingResolver {
    /// Same as [`EndingResolver::standard`].
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::Fact;

    fn prepared() -> SessionState {
        let mut state = SessionState::new();
        for item in [Item::ForestArtifact, Item::RuinsArtifact, Item::CoreArtifact] {
            state.set(Fact::Item(item));
        }
        state.set(Fact::Puzzle(Puzzle::StoneSymbols));
        state.set(Fact::Puzzle(Puzzle::DoorSymbol));
        state
    }

    #[test]
    fn open_endings_always_reached() {
        let resolver = EndingResolver::standard();
        let state = SessionState::new();
        for ending in [Ending::Reinforce, Ending::Release, Ending::Abstain] {
            assert_eq!(resolver.resolve(ending, &state), EndingOutcome::Reached(ending));
        }
    }

    #[test]
    fn default_resolver_is_the_story_resolver() {
        assert_eq!(EndingResolver::default(), EndingResolver::standard());

        let open = EndingResolver::unconstrained();
        assert_ne!(open, EndingResolver::default());
        assert_eq!(open.requirement(Ending::Transcend), Condition::Always);
        assert_eq!(
            open.resolve(Ending::Transcend, &SessionState::new()),
            EndingOutcome::Reached(Ending::Transcend)
        );
    }

    #[test]
    fn transcend_with_everything() {
        let resolver = EndingResolver::standard();
        assert_eq!(
            resolver.resolve(Ending::Transcend, &prepared()),
            EndingOutcome::Reached(Ending::Transcend)
        );
    }

    #[test]
    fn transcend_is_a_strict_conjunction() {
        let resolver = EndingResolver::standard();

        let mut removals: Vec<Box<dyn Fn(&mut SessionState)>> = Vec::new();
        for item in [Item::ForestArtifact, Item::RuinsArtifact, Item::CoreArtifact] {
            removals.push(Box::new(move |s: &mut SessionState| {
                s.unset(Fact::Item(item));
            }));
        }
        for puzzle in [Puzzle::StoneSymbols, Puzzle::DoorSymbol] {
            // Puzzles cannot be unset, so build the state without this one.
            removals.push(Box::new(move |s: &mut SessionState| {
                let mut rebuilt = SessionState::with_health(s.health());
                for item in s.inventory() {
                    rebuilt.set(Fact::Item(item));
                }
                for other in s.completed_puzzles().filter(|p| *p != puzzle) {
                    rebuilt.set(Fact::Puzzle(other));
                }
                *s = rebuilt;
            }));
        }
        removals.push(Box::new(|s: &mut SessionState| {
            s.damage(100);
        }));

        assert_eq!(removals.len(), 6);
        for remove in &removals {
            let mut state = prepared();
            remove(&mut state);
            match resolver.resolve(Ending::Transcend, &state) {
                EndingOutcome::Rejected { ending, unmet } => {
                    assert_eq!(ending, Ending::Transcend);
                    assert_eq!(unmet.len(), 1);
                }
                other => panic!("expected rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn requirement_defaults_to_always() {
        let resolver = EndingResolver::standard();
        assert_eq!(resolver.requirement(Ending::Abstain), Condition::Always);
        assert_eq!(resolver.requirement(Ending::Transcend).conjuncts().len(), 6);
    }

    #[test]
    fn ending_effects() {
        assert_eq!(
            Ending::Reinforce.effects(),
            vec![Effect::SetFlag(StoryFlag::RitualReinforced)]
        );
        assert_eq!(
            Ending::Release.effects(),
            vec![Effect::SetFlag(StoryFlag::RitualDestroyed)]
        );
        assert!(Ending::Transcend.effects().is_empty());
    }
}
