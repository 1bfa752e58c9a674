//! Gating predicates over the session state.

use std::{fmt, ops};

use kb_core::{Fact, Item, Location, Puzzle, SessionState, StoryFlag};

/// A read-only predicate evaluated against the session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Condition {
    /// The player holds an item.
    HasItem(Item),
    /// A puzzle has been completed.
    PuzzleSolved(Puzzle),
    /// A story flag is set.
    FlagSet(StoryFlag),
    /// A location has been entered.
    Visited(Location),
    /// Health is strictly above the given value.
    HealthAbove(i32),
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND. Empty is true.
    And(Vec<Condition>),
    /// Logical OR. Empty is false.
    Or(Vec<Condition>),
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// Evaluate the condition against the current state.
    pub fn evaluate(&self, state: &SessionState) -> bool {
        match self {
            Condition::HasItem(item) => state.has(Fact::Item(*item)),
            Condition::PuzzleSolved(puzzle) => state.has(Fact::Puzzle(*puzzle)),
            Condition::FlagSet(flag) => state.has(Fact::Flag(*flag)),
            Condition::Visited(location) => state.has(Fact::Visited(*location)),
            Condition::HealthAbove(threshold) => state.health() > *threshold,
            Condition::Not(inner) => !inner.evaluate(state),
            Condition::And(conditions) => conditions.iter().all(|c| c.evaluate(state)),
            Condition::Or(conditions) => conditions.iter().any(|c| c.evaluate(state)),
            Condition::Always => true,
        }
    }

    /// The sub-conditions of a conjunction, or the condition itself.
    pub fn conjuncts(&self) -> &[Condition] {
        match self {
            Condition::And(parts) => parts,
            other => std::slice::from_ref(other),
        }
    }
}

impl ops::Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::HasItem(item) => write!(f, "has {}", item.key()),
            Condition::PuzzleSolved(puzzle) => write!(f, "solved {}", puzzle.key()),
            Condition::FlagSet(flag) => write!(f, "flag {}", flag.key()),
            Condition::Visited(location) => write!(f, "visited {}", location.key()),
            Condition::HealthAbove(n) => write!(f, "health > {n}"),
            Condition::Not(inner) => write!(f, "not ({inner})"),
            Condition::And(parts) => write_joined(f, parts, " and "),
            Condition::Or(parts) => write_joined(f, parts, " or "),
            Condition::Always => write!(f, "always"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[Condition], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{part}")?;
    }
    write!(f, ")")
}
