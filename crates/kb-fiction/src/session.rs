//! The driver loop that plays a story graph through a shell.

use kb_core::{RandomSource, SessionState, Shell, StdRandom, choose_checked};
use kb_mechanics::{Combat, CombatOutcome};
use serde::Serialize;
use tracing::debug;

use crate::choice::{Choice, EncounterId, NodeId, Transition};
use crate::config::SessionConfig;
use crate::content::{self, endings};
use crate::ending::{Ending, EndingOutcome, EndingResolver};
use crate::error::FictionResult;
use crate::graph::StoryGraph;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// An ending was reached.
    Ending(Ending),
    /// Health ran out outside of combat.
    Fallen,
    /// The player backed out of the root node.
    Abandoned,
}

/// A single play session.
///
/// Holds the state, the graph, and a stack of frames. The root node is
/// always the bottom frame. Moving from the root pushes a frame; moving
/// anywhere else replaces the top frame. `Pop` returns to the frame below,
/// and popping the root abandons the session.
pub struct StorySession {
    graph: StoryGraph,
    resolver: EndingResolver,
    state: SessionState,
    frames: Vec<NodeId>,
    config: SessionConfig,
    rng: Box<dyn RandomSource>,
    entering: bool,
}

impl StorySession {
    /// Create a session over the built-in story.
    pub fn new(config: SessionConfig) -> FictionResult<Self> {
        let rng = Box::new(StdRandom::from_seed_option(config.seed));
        Self::with_parts(content::story(), config, rng)
    }

    /// Create a session over any graph with an injected random source.
    ///
    /// Fails if the graph has dangling transitions.
    pub fn with_parts(
        graph: StoryGraph,
        config: SessionConfig,
        rng: Box<dyn RandomSource>,
    ) -> FictionResult<Self> {
        graph.validate()?;
        Ok(Self {
            frames: vec![graph.root()],
            graph,
            resolver: EndingResolver::standard(),
            state: SessionState::with_health(config.starting_health),
            config,
            rng,
            entering: true,
        })
    }

    /// Replace the ending resolver.
    pub fn with_resolver(mut self, resolver: EndingResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Start from `node` instead of the root, as if reached from the root.
    pub fn start_at(mut self, node: NodeId) -> FictionResult<Self> {
        self.graph.node(node)?;
        self.frames.truncate(1);
        if node != self.graph.root() {
            self.frames.push(node);
        }
        self.entering = true;
        Ok(self)
    }

    /// The session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mutable access to the session state.
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// The graph being played.
    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// The node currently presented, if the session is still open.
    pub fn current(&self) -> Option<NodeId> {
        self.frames.last().copied()
    }

    /// The frame stack, root first.
    pub fn frames(&self) -> &[NodeId] {
        &self.frames
    }

    /// Choices the current node offers in the current state.
    pub fn available_choices(&self) -> FictionResult<Vec<&Choice>> {
        match self.current() {
            Some(id) => Ok(self.graph.node(id)?.available_choices(&self.state)),
            None => Ok(Vec::new()),
        }
    }

    /// Present the prologue and play until the session ends.
    pub fn run(&mut self, shell: &mut dyn Shell) -> FictionResult<SessionEnd> {
        shell.present(content::TITLE);
        shell.present(content::PROLOGUE);
        loop {
            if let Some(end) = self.step(shell)? {
                debug!(?end, "session over");
                return Ok(end);
            }
        }
    }

    /// Present the current node, take one choice, and resolve it.
    ///
    /// Returns the end of the session if this choice ended it.
    pub fn step(&mut self, shell: &mut dyn Shell) -> FictionResult<Option<SessionEnd>> {
        let Some(id) = self.current() else {
            return Ok(Some(SessionEnd::Abandoned));
        };
        let node = self.graph.node(id)?;

        if std::mem::take(&mut self.entering) {
            debug!(node = %id, depth = self.frames.len(), "entering node");
            shell.present(&format!("== {} ==", node.title));
            shell.show_status(&self.state);
            for line in node.enter(&mut self.state) {
                shell.present(&line);
            }
        } else {
            shell.show_status(&self.state);
        }
        shell.present(&node.describe(&self.state));

        let choices = node.available_choices(&self.state);
        let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
        let index = choose_checked(shell, &labels)?;
        let choice = choices[index];
        debug!(node = %id, choice = %choice.label, "choice selected");

        let Some(branch) = choice.resolve(&self.state).cloned() else {
            return Ok(None);
        };
        if !branch.response.is_empty() {
            shell.present(&branch.response);
        }
        for effect in &branch.effects {
            if let Some(notice) = effect.apply(&mut self.state) {
                shell.present(&notice);
            }
        }

        if let Some(end) = self.follow(branch.transition, shell)? {
            return Ok(Some(end));
        }
        if !self.state.is_alive() {
            shell.present(endings::FALLEN);
            return Ok(Some(SessionEnd::Fallen));
        }
        Ok(None)
    }

    fn follow(
        &mut self,
        transition: Transition,
        shell: &mut dyn Shell,
    ) -> FictionResult<Option<SessionEnd>> {
        debug!(%transition, "following transition");
        match transition {
            Transition::Stay => {}
            Transition::GoTo(target) => {
                self.graph.node(target)?;
                if target == self.graph.root() {
                    self.frames.truncate(1);
                } else if self.frames.len() <= 1 {
                    self.frames.push(target);
                } else if let Some(top) = self.frames.last_mut() {
                    *top = target;
                }
                self.entering = true;
            }
            Transition::Pop => {
                self.frames.pop();
                if self.frames.is_empty() {
                    return Ok(Some(SessionEnd::Abandoned));
                }
                self.entering = true;
            }
            Transition::EnterCombat(encounter) => self.fight(encounter, shell)?,
            Transition::Terminal(ending) => return Ok(self.conclude(ending, shell)),
        }
        Ok(None)
    }

    fn fight(&mut self, id: EncounterId, shell: &mut dyn Shell) -> FictionResult<()> {
        let encounter = self.graph.encounter(id)?;
        let mut combat = Combat::new(encounter.foe.clone(), self.config.combat.clone());
        let outcome = combat.run(&mut self.state, shell, self.rng.as_mut())?;

        match outcome {
            CombatOutcome::PlayerWon => {
                shell.present(&encounter.victory);
                for effect in &encounter.rewards {
                    if let Some(notice) = effect.apply(&mut self.state) {
                        shell.present(&notice);
                    }
                }
            }
            CombatOutcome::PlayerFled => shell.present(&encounter.fled),
            CombatOutcome::PlayerDefeated => shell.present(&encounter.defeat),
        }
        Ok(())
    }

    fn conclude(&mut self, ending: Ending, shell: &mut dyn Shell) -> Option<SessionEnd> {
        match self.resolver.resolve(ending, &self.state) {
            EndingOutcome::Reached(ending) => {
                for effect in ending.effects() {
                    effect.apply(&mut self.state);
                }
                shell.present(ending.narration());
                Some(SessionEnd::Ending(ending))
            }
            EndingOutcome::Rejected { .. } => {
                shell.present(endings::REJECTED);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FictionError;
    use kb_core::testing::{FixedRng, ScriptedShell, SequenceRng};
    use kb_core::{CoreError, Fact, Item, Location, Puzzle, StoryFlag};

    fn session(rng: impl RandomSource + 'static) -> StorySession {
        StorySession::with_parts(content::story(), SessionConfig::default(), Box::new(rng))
            .unwrap()
    }

    fn at(node: NodeId) -> StorySession {
        session(SequenceRng::new(Vec::<u32>::new()))
            .start_at(node)
            .unwrap()
    }

    fn labels(session: &StorySession) -> Vec<String> {
        session
            .available_choices()
            .unwrap()
            .iter()
            .map(|c| c.label.clone())
            .collect()
    }

    #[test]
    fn correct_door_symbol_grants_the_key() {
        let mut s = at(NodeId::OldHouse);
        let mut shell = ScriptedShell::new([2]);

        assert_eq!(s.step(&mut shell).unwrap(), None);
        assert!(s.state().is_solved(Puzzle::DoorSymbol));
        assert!(s.state().has_item(Item::RustyKey));
        assert!(s.state().has_item(Item::TatteredNote));
        assert_eq!(s.state().health(), 100);
        assert_eq!(s.frames(), &[NodeId::Hub, NodeId::Village]);
    }

    #[test]
    fn using_the_key_again_changes_nothing() {
        let mut s = at(NodeId::OldHouse);
        let mut shell = ScriptedShell::new([2]);
        s.step(&mut shell).unwrap();
        let solved = s.state().clone();

        let mut s = s.start_at(NodeId::OldHouse).unwrap();
        assert!(labels(&s)[0].contains("rusty key"));
        let mut shell = ScriptedShell::new([0]);
        s.step(&mut shell).unwrap();

        assert_eq!(s.state(), &solved);
        assert!(!shell.saw("You obtained"));
        assert!(!shell.saw("Solved:"));
    }

    #[test]
    fn wrong_answer_retries_the_same_puzzle() {
        let mut s = at(NodeId::StonePath);
        let mut shell = ScriptedShell::new([0, 3, 1]);

        s.step(&mut shell).unwrap();
        assert_eq!(s.current(), Some(NodeId::StonePath));
        assert_eq!(s.state().health(), 80);

        s.step(&mut shell).unwrap();
        assert_eq!(s.current(), Some(NodeId::StonePath));
        assert_eq!(s.state().health(), 60);
        assert!(!s.state().is_solved(Puzzle::StoneSymbols));

        s.step(&mut shell).unwrap();
        assert!(s.state().is_solved(Puzzle::StoneSymbols));
        assert!(s.state().has_item(Item::ProtectiveCharm));
        assert_eq!(s.current(), Some(NodeId::Forest));
        assert_eq!(s.state().health(), 60);
    }

    #[test]
    fn unarmed_fight_at_minimum_rolls() {
        let mut s = session(FixedRng::Min).start_at(NodeId::Ruins).unwrap();
        // The altar, then ten bare-handed attacks.
        let mut shell =
            ScriptedShell::new(std::iter::once(0).chain(std::iter::repeat_n(0, 10)));

        assert_eq!(s.step(&mut shell).unwrap(), None);
        for remaining in [45, 40, 35, 30, 25, 20, 15, 10, 5] {
            assert!(shell.saw(&format!("Shadow Creature HP: {remaining} |")));
        }
        assert!(s.state().has_item(Item::RuinsArtifact));
        assert_eq!(s.state().health(), 10);
        assert_eq!(s.current(), Some(NodeId::Ruins));
    }

    #[test]
    fn defeat_resets_health_and_withholds_the_reward() {
        let mut s = session(FixedRng::Max).start_at(NodeId::Ruins).unwrap();
        s.state_mut().damage(80);
        // The altar, then brace: 15 absorbed plus 25 retaliation.
        let mut shell = ScriptedShell::new([0, 3]);

        assert_eq!(s.step(&mut shell).unwrap(), None);
        assert_eq!(s.state().health(), 50);
        assert!(!s.state().has_item(Item::RuinsArtifact));
        assert!(shell.saw("you do not die"));
        assert_eq!(s.current(), Some(NodeId::Ruins));
    }

    #[test]
    fn fleeing_keeps_the_node() {
        let mut s = at(NodeId::Ruins);
        let mut shell = ScriptedShell::new([0, 2]);
        assert_eq!(s.step(&mut shell).unwrap(), None);
        assert_eq!(s.state().health(), 100);
        assert!(!s.state().has_item(Item::RuinsArtifact));
        assert!(shell.saw("waiting"));
    }

    #[test]
    fn prepared_player_transcends() {
        let mut s = at(NodeId::Cave);
        for item in [Item::ForestArtifact, Item::RuinsArtifact, Item::CoreArtifact] {
            s.state_mut().set(Fact::Item(item));
        }
        s.state_mut().set(Fact::Puzzle(Puzzle::StoneSymbols));
        s.state_mut().set(Fact::Puzzle(Puzzle::DoorSymbol));
        let mut shell = ScriptedShell::new([0, 3]);

        assert_eq!(s.step(&mut shell).unwrap(), None);
        assert_eq!(s.current(), Some(NodeId::Climax));
        assert_eq!(
            s.step(&mut shell).unwrap(),
            Some(SessionEnd::Ending(Ending::Transcend))
        );
        assert!(s.state().has_flag(StoryFlag::MetEntity));
        assert!(s.state().has(Fact::Visited(Location::Core)));
        assert!(shell.saw("BREAKING THE CYCLE"));
        assert!(!shell.saw(endings::REJECTED));
    }

    #[test]
    fn unprepared_transcend_returns_to_the_climax() {
        let mut s = at(NodeId::Climax);
        let mut shell = ScriptedShell::new([3, 0]);

        assert_eq!(s.step(&mut shell).unwrap(), None);
        assert_eq!(s.current(), Some(NodeId::Climax));
        assert!(shell.saw(endings::REJECTED));
        assert_eq!(shell.last_menu().map(<[String]>::len), Some(4));

        assert_eq!(
            s.step(&mut shell).unwrap(),
            Some(SessionEnd::Ending(Ending::Reinforce))
        );
        assert!(s.state().has_flag(StoryFlag::RitualReinforced));
        assert!(!s.state().has_flag(StoryFlag::RitualDestroyed));
    }

    #[test]
    fn release_destroys_the_ritual() {
        let mut s = at(NodeId::Climax);
        let mut shell = ScriptedShell::new([1]);
        assert_eq!(
            s.step(&mut shell).unwrap(),
            Some(SessionEnd::Ending(Ending::Release))
        );
        assert!(s.state().has_flag(StoryFlag::RitualDestroyed));
    }

    #[test]
    fn running_out_of_health_ends_the_session() {
        let mut s = at(NodeId::DryWell);
        s.state_mut().damage(80);
        let mut shell = ScriptedShell::new([1]);

        assert_eq!(s.step(&mut shell).unwrap(), Some(SessionEnd::Fallen));
        assert_eq!(s.state().health(), 0);
        assert!(shell.saw(endings::FALLEN));
    }

    #[test]
    fn hub_moves_push_and_back_pops() {
        let mut s = at(NodeId::Hub);
        let mut shell = ScriptedShell::new([1, 0, 4]);

        s.step(&mut shell).unwrap();
        assert_eq!(s.frames(), &[NodeId::Hub, NodeId::Forest]);

        s.step(&mut shell).unwrap();
        assert_eq!(s.frames(), &[NodeId::Hub, NodeId::StonePath]);

        // Back from the stone path goes to the fork, then the fork pops.
        s.step(&mut shell).unwrap();
        assert_eq!(s.frames(), &[NodeId::Hub, NodeId::Forest]);
        let mut shell = ScriptedShell::new([2]);
        s.step(&mut shell).unwrap();
        assert_eq!(s.frames(), &[NodeId::Hub]);
    }

    #[test]
    fn hidden_path_offered_exactly_once_with_the_note() {
        let mut s = at(NodeId::Forest);
        let hidden = |menu: &[String]| {
            menu.iter()
                .filter(|l| l.contains("hidden path"))
                .count()
        };
        assert_eq!(hidden(&labels(&s)), 0);

        s.state_mut().set(Fact::Item(Item::TatteredNote));
        assert_eq!(hidden(&labels(&s)), 1);
    }

    #[test]
    fn establishing_narration_plays_once() {
        let mut s = at(NodeId::Hub);
        // Village, back, village, back, quit.
        let mut shell = ScriptedShell::new([0, 4, 0, 4, 4]);

        assert_eq!(s.run(&mut shell).unwrap(), SessionEnd::Abandoned);
        assert_eq!(shell.count("There are things you should know"), 1);
        assert_eq!(shell.count("Four places in the village"), 2);
        assert_eq!(shell.count(content::PROLOGUE), 1);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut s = at(NodeId::Hub);
        let mut shell = ScriptedShell::default();
        assert!(matches!(
            s.run(&mut shell),
            Err(FictionError::Shell(CoreError::InputClosed))
        ));
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let mut s = at(NodeId::Hub);
        let mut shell = ScriptedShell::new([9]);
        assert!(matches!(
            s.step(&mut shell),
            Err(FictionError::Shell(CoreError::InvalidChoice {
                index: 9,
                available: 5
            }))
        ));
    }

    #[test]
    fn dangling_routes_are_rejected() {
        let graph = StoryGraph::new(NodeId::Hub).with_node(content::hub::crossroads());
        let result = StorySession::with_parts(
            graph,
            SessionConfig::default(),
            Box::new(FixedRng::Min),
        );
        assert!(matches!(result, Err(FictionError::NodeNotFound(_))));
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let play = || {
            let mut s = StorySession::new(SessionConfig::default().with_seed(11))
                .unwrap()
                .start_at(NodeId::Ruins)
                .unwrap();
            let mut shell =
                ScriptedShell::new(std::iter::once(0).chain(std::iter::repeat_n(0, 20)));
            s.step(&mut shell).unwrap();
            (s.state().clone(), shell.transcript)
        };
        assert_eq!(play(), play());
    }
}
