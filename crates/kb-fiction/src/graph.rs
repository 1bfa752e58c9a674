//! The narrative graph: nodes, encounters, and static checks over them.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use kb_mechanics::Foe;
use serde::Serialize;

use crate::choice::{Effect, EncounterId, Node, NodeId, Transition};
use crate::error::{FictionError, FictionResult};

/// A fight reachable from some choice, with its aftermath.
#[derive(Debug, Clone)]
pub struct Encounter {
    /// Unique identifier.
    pub id: EncounterId,
    /// The opponent.
    pub foe: Foe,
    /// Narration after a win.
    pub victory: String,
    /// Effects applied after a win.
    pub rewards: Vec<Effect>,
    /// Narration after fleeing.
    pub fled: String,
    /// Narration after a defeat.
    pub defeat: String,
}

/// The directed graph of story nodes.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    root: NodeId,
    nodes: BTreeMap<NodeId, Node>,
    encounters: BTreeMap<EncounterId, Encounter>,
}

impl StoryGraph {
    /// Create an empty graph whose sessions start at `root`.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            nodes: BTreeMap::new(),
            encounters: BTreeMap::new(),
        }
    }

    /// Add a node, replacing any node with the same id.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.insert(node.id, node);
        self
    }

    /// Add an encounter.
    pub fn with_encounter(mut self, encounter: Encounter) -> Self {
        self.encounters.insert(encounter.id, encounter);
        self
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> FictionResult<&Node> {
        self.nodes.get(&id).ok_or(FictionError::NodeNotFound(id))
    }

    /// Look up an encounter.
    pub fn encounter(&self, id: EncounterId) -> FictionResult<&Encounter> {
        self.encounters
            .get(&id)
            .ok_or(FictionError::EncounterNotFound(id))
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All encounters in id order.
    pub fn encounters(&self) -> impl Iterator<Item = &Encounter> {
        self.encounters.values()
    }

    fn transitions(&self) -> impl Iterator<Item = (NodeId, Transition)> + '_ {
        self.nodes.values().flat_map(|node| {
            node.choices
                .iter()
                .flat_map(|c| c.branches.iter())
                .map(move |b| (node.id, b.transition))
        })
    }

    /// Check that the root exists and every transition has a target.
    pub fn validate(&self) -> FictionResult<()> {
        self.node(self.root)?;
        for (_, transition) in self.transitions() {
            match transition {
                Transition::GoTo(target) => {
                    self.node(target)?;
                }
                Transition::EnterCombat(encounter) => {
                    self.encounter(encounter)?;
                }
                Transition::Stay | Transition::Pop | Transition::Terminal(_) => {}
            }
        }
        Ok(())
    }

    /// Nodes reachable from the root, ignoring choice conditions.
    ///
    /// `Pop` only ever returns to a node already on the path, so following
    /// `GoTo` edges is enough.
    pub fn reachable(&self) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let targets = node
                .choices
                .iter()
                .flat_map(|c| c.branches.iter())
                .filter_map(|b| match b.transition {
                    Transition::GoTo(target) => Some(target),
                    _ => None,
                });
            for target in targets {
                if seen.insert(target) {
                    queue.push_back(target);
                }
            }
        }
        seen
    }

    /// A serializable outline of the graph.
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            root: self.root,
            nodes: self
                .nodes
                .values()
                .map(|node| NodeSummary {
                    id: node.id,
                    title: node.title.clone(),
                    visits: node.visit.map(|l| l.key()),
                    choices: node
                        .choices
                        .iter()
                        .map(|choice| ChoiceSummary {
                            label: choice.label.clone(),
                            condition: choice.condition.to_string(),
                            back: choice.back,
                            branches: choice
                                .branches
                                .iter()
                                .map(|b| BranchSummary {
                                    condition: b.condition.to_string(),
                                    effects: b.effects.iter().map(ToString::to_string).collect(),
                                    transition: b.transition.to_string(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
            encounters: self
                .encounters
                .values()
                .map(|e| EncounterSummary {
                    id: e.id,
                    foe: e.foe.name.clone(),
                    health: e.foe.health,
                })
                .collect(),
        }
    }
}

/// Outline of a whole graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    /// Where sessions start.
    pub root: NodeId,
    /// Every node.
    pub nodes: Vec<NodeSummary>,
    /// Every encounter.
    pub encounters: Vec<EncounterSummary>,
}

/// Outline of one node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    /// Node id.
    pub id: NodeId,
    /// Heading.
    pub title: String,
    /// Location recorded on entry.
    pub visits: Option<&'static str>,
    /// Choices in menu order.
    pub choices: Vec<ChoiceSummary>,
}

/// Outline of one choice.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceSummary {
    /// Menu label.
    pub label: String,
    /// Visibility condition.
    pub condition: String,
    /// Whether this is the back choice.
    pub back: bool,
    /// Branches in evaluation order.
    pub branches: Vec<BranchSummary>,
}

/// Outline of one branch.
#[derive(Debug, Clone, Serialize)]
pub struct BranchSummary {
    /// Branch condition.
    pub condition: String,
    /// Effects applied.
    pub effects: Vec<String>,
    /// Where control goes.
    pub transition: String,
}

/// Outline of one encounter.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterSummary {
    /// Encounter id.
    pub id: EncounterId,
    /// Foe name.
    pub foe: String,
    /// Foe starting health.
    pub health: i32,
}
