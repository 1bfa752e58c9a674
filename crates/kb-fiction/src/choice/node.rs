//! Nodes, choices, and the transitions between them.

use std::fmt;

use kb_core::{Location, SessionState, StoryFlag};
use serde::Serialize;
use tracing::trace;

use super::condition::Condition;
use super::effect::Effect;
use crate::ending::Ending;

/// Identifies a node in the narrative graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    /// The crossroads every expedition starts from.
    Hub,
    /// The village square.
    Village,
    /// Where the villagers gather.
    VillageHall,
    /// The locked house and its door puzzle.
    OldHouse,
    /// The dry well.
    DryWell,
    /// The bell tower.
    BellTower,
    /// The misty forest.
    Forest,
    /// The stone path and its ordering puzzle.
    StonePath,
    /// The swamp trail.
    Swamp,
    /// The path only the note reveals.
    HiddenPath,
    /// The ancient ruins.
    Ruins,
    /// The forbidden cave.
    Cave,
    /// The dweller's chamber, where the story ends.
    Climax,
}

impl NodeId {
    /// Every node id, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Hub,
        Self::Village,
        Self::VillageHall,
        Self::OldHouse,
        Self::DryWell,
        Self::BellTower,
        Self::Forest,
        Self::StonePath,
        Self::Swamp,
        Self::HiddenPath,
        Self::Ruins,
        Self::Cave,
        Self::Climax,
    ];

    /// The stable snake_case key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Hub => "hub",
            Self::Village => "village",
            Self::VillageHall => "village_hall",
            Self::OldHouse => "old_house",
            Self::DryWell => "dry_well",
            Self::BellTower => "bell_tower",
            Self::Forest => "forest",
            Self::StonePath => "stone_path",
            Self::Swamp => "swamp",
            Self::HiddenPath => "hidden_path",
            Self::Ruins => "ruins",
            Self::Cave => "cave",
            Self::Climax => "climax",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Identifies a combat encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterId {
    /// The shadow guarding the ruins altar.
    Shadow,
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shadow => write!(f, "shadow"),
        }
    }
}

/// Where control goes after a choice resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum Transition {
    /// Re-present the current node.
    Stay,
    /// Move to another node.
    GoTo(NodeId),
    /// Return to the caller's node.
    Pop,
    /// Fight, then re-present the current node.
    EnterCombat(EncounterId),
    /// Ask the ending resolver for an ending.
    Terminal(Ending),
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Stay => write!(f, "stay"),
            Transition::GoTo(node) => write!(f, "go to {node}"),
            Transition::Pop => write!(f, "back"),
            Transition::EnterCombat(encounter) => write!(f, "fight {encounter}"),
            Transition::Terminal(ending) => write!(f, "ending {}", ending.key()),
        }
    }
}

/// One possible result of a choice.
#[derive(Debug, Clone)]
pub struct Branch {
    /// Must hold for this branch to be taken.
    pub condition: Condition,
    /// Narration shown when the branch is taken.
    pub response: String,
    /// Effects applied after the narration.
    pub effects: Vec<Effect>,
    /// Where control goes afterwards.
    pub transition: Transition,
}

impl Branch {
    /// An unconditional branch that stays on the current node.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            condition: Condition::Always,
            response: response.into(),
            effects: Vec::new(),
            transition: Transition::Stay,
        }
    }

    /// Only take this branch when `condition` holds.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the transition.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }
}

/// A single choice offered at a node.
///
/// A choice resolves to the first of its branches whose condition holds.
/// The last branch should be unconditional.
#[derive(Debug, Clone)]
pub struct Choice {
    /// The text shown to the player.
    pub label: String,
    /// Must hold for the choice to be offered at all.
    pub condition: Condition,
    /// Candidate results, tried in order.
    pub branches: Vec<Branch>,
    /// Marks the node's "return to parent" choice.
    pub back: bool,
}

impl Choice {
    /// Create a choice with a single unconditional branch.
    pub fn new(label: impl Into<String>, response: impl Into<String>) -> Self {
        Self::branching(label, vec![Branch::new(response)])
    }

    /// Create a choice from several branches.
    pub fn branching(label: impl Into<String>, branches: Vec<Branch>) -> Self {
        Self {
            label: label.into(),
            condition: Condition::Always,
            branches,
            back: false,
        }
    }

    /// Create a choice that moves straight to `target` without narration.
    pub fn travel(label: impl Into<String>, target: NodeId) -> Self {
        Self::new(label, "").with_transition(Transition::GoTo(target))
    }

    /// Create a "return to parent" choice: no narration, no effects.
    pub fn back(label: impl Into<String>, transition: Transition) -> Self {
        let mut choice = Self::branching(label, vec![Branch::new("").with_transition(transition)]);
        choice.back = true;
        choice
    }

    /// Only offer this choice when `condition` holds.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Add an effect to the last branch.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        if let Some(branch) = self.branches.last_mut() {
            branch.effects.push(effect);
        }
        self
    }

    /// Set the transition of the last branch.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        if let Some(branch) = self.branches.last_mut() {
            branch.transition = transition;
        }
        self
    }

    /// True if the choice is offered in this state.
    pub fn is_available(&self, state: &SessionState) -> bool {
        self.condition.evaluate(state)
    }

    /// The branch this choice resolves to in this state.
    pub fn resolve(&self, state: &SessionState) -> Option<&Branch> {
        self.branches.iter().find(|b| b.condition.evaluate(state))
    }
}

/// Narration played the first time a location is entered.
#[derive(Debug, Clone)]
pub struct Establishing {
    /// Set once the narration has played.
    pub flag: StoryFlag,
    /// The narration.
    pub text: String,
}

/// A location or sub-scene.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Heading shown on entry.
    pub title: String,
    /// Recorded in the visited set on entry.
    pub visit: Option<Location>,
    /// One-time narration on first entry.
    pub establishing: Option<Establishing>,
    /// Effects applied on every entry.
    pub on_enter: Vec<Effect>,
    /// Shown each time the node is presented.
    pub description: String,
    /// Extra lines shown after the description when their condition holds.
    pub asides: Vec<(Condition, String)>,
    /// Choices, in menu order.
    pub choices: Vec<Choice>,
}

impl Node {
    /// Create a node with the given id, title, and description.
    pub fn new(id: NodeId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            visit: None,
            establishing: None,
            on_enter: Vec::new(),
            description: description.into(),
            asides: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// Record `location` as visited on entry.
    pub fn visits(mut self, location: Location) -> Self {
        self.visit = Some(location);
        self
    }

    /// Play `text` the first time the node is entered, guarded by `flag`.
    pub fn establishing(mut self, flag: StoryFlag, text: impl Into<String>) -> Self {
        self.establishing = Some(Establishing {
            flag,
            text: text.into(),
        });
        self
    }

    /// Apply `effect` on every entry.
    pub fn on_enter(mut self, effect: Effect) -> Self {
        self.on_enter.push(effect);
        self
    }

    /// Show `text` after the description while `condition` holds.
    pub fn with_aside(mut self, condition: Condition, text: impl Into<String>) -> Self {
        self.asides.push((condition, text.into()));
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Run entry bookkeeping and return the narration it produced.
    ///
    /// Marks the location visited, plays the establishing narration if its
    /// flag is not yet set (and sets it), then applies entry effects.
    pub fn enter(&self, state: &mut SessionState) -> Vec<String> {
        let mut narration = Vec::new();
        if let Some(location) = self.visit {
            Effect::MarkVisited(location).apply(state);
        }
        let first_visit = self
            .establishing
            .as_ref()
            .filter(|e| !state.has_flag(e.flag));
        if let Some(establishing) = first_visit {
            trace!(node = %self.id, "first visit");
            Effect::SetFlag(establishing.flag).apply(state);
            narration.push(establishing.text.clone());
        }
        for effect in &self.on_enter {
            if let Some(notice) = effect.apply(state) {
                narration.push(notice);
            }
        }
        narration
    }

    /// The description plus any asides that currently hold.
    pub fn describe(&self, state: &SessionState) -> String {
        let mut text = self.description.clone();
        for (condition, aside) in &self.asides {
            if condition.evaluate(state) {
                text.push_str("\n\n");
                text.push_str(aside);
            }
        }
        text
    }

    /// Choices offered in this state, in menu order.
    pub fn available_choices(&self, state: &SessionState) -> Vec<&Choice> {
        self.choices
            .iter()
            .filter(|c| c.is_available(state))
            .collect()
    }

    /// The node's "return to parent" choice, if it has one.
    pub fn back_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.back)
    }
}
