//! The uniform shape of puzzle nodes.

use kb_core::Puzzle;

use super::condition::Condition;
use super::effect::Effect;
use super::node::{Branch, Choice, Node, Transition};

/// A multiple-answer puzzle with exactly one correct answer.
///
/// The correct answer completes the puzzle, grants the rewards, and leaves
/// via `solved`. Every other answer costs `penalty` health and presents the
/// same node again. There is no attempt limit.
#[derive(Debug, Clone)]
pub struct PuzzleSpec {
    /// The puzzle this node completes.
    pub puzzle: Puzzle,
    /// Answer labels, in menu order.
    pub answers: Vec<String>,
    /// Index of the correct answer in `answers`.
    pub correct: usize,
    /// Damage for each wrong answer.
    pub penalty: u32,
    /// Narration for the correct answer.
    pub success: String,
    /// Narration for a wrong answer.
    pub failure: String,
    /// Items granted alongside completion.
    pub rewards: Vec<Effect>,
    /// Where the correct answer leads.
    pub solved: Transition,
}

impl PuzzleSpec {
    /// Start a puzzle spec.
    pub fn new(puzzle: Puzzle, correct: usize, penalty: u32) -> Self {
        Self {
            puzzle,
            answers: Vec::new(),
            correct,
            penalty,
            success: String::new(),
            failure: String::new(),
            rewards: Vec::new(),
            solved: Transition::Stay,
        }
    }

    /// Add an answer.
    pub fn answer(mut self, label: impl Into<String>) -> Self {
        self.answers.push(label.into());
        self
    }

    /// Set the success and failure narration.
    pub fn narration(mut self, success: impl Into<String>, failure: impl Into<String>) -> Self {
        self.success = success.into();
        self.failure = failure.into();
        self
    }

    /// Grant `effect` when solved.
    pub fn reward(mut self, effect: Effect) -> Self {
        self.rewards.push(effect);
        self
    }

    /// Where the correct answer leads.
    pub fn solved_to(mut self, transition: Transition) -> Self {
        self.solved = transition;
        self
    }

    /// The canonical solved branch with the given narration.
    ///
    /// Completion and rewards use set semantics, so taking it again changes
    /// nothing.
    pub fn solved_branch(&self, response: impl Into<String>) -> Branch {
        let mut branch = Branch::new(response)
            .with_effect(Effect::SolvePuzzle(self.puzzle))
            .with_transition(self.solved);
        branch.effects.extend(self.rewards.iter().cloned());
        branch
    }

    /// The choices for each answer, in order.
    pub fn choices(&self) -> Vec<Choice> {
        self.answers
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let branch = if i == self.correct {
                    self.solved_branch(self.success.clone())
                } else {
                    Branch::new(self.failure.clone()).with_effect(Effect::Damage(self.penalty))
                };
                Choice::branching(label.clone(), vec![branch])
            })
            .collect()
    }

    /// Build the puzzle node: extra choices first, then the answers, then
    /// the back choice.
    pub fn into_node(
        self,
        mut node: Node,
        extra: Vec<Choice>,
        back_label: &str,
        back: Transition,
    ) -> Node {
        node.choices.extend(extra);
        node.choices.extend(self.choices());
        node.with_choice(Choice::back(back_label, back))
    }

    /// True when the puzzle is already complete.
    pub fn solved_condition(&self) -> Condition {
        Condition::PuzzleSolved(self.puzzle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::NodeId;
    use kb_core::{Item, SessionState};

    fn spec() -> PuzzleSpec {
        PuzzleSpec::new(Puzzle::DoorSymbol, 2, 15)
            .answer("Moon")
            .answer("Sun")
            .answer("Balance")
            .narration("The door opens.", "The door shudders.")
            .reward(Effect::GiveItem(Item::RustyKey))
            .solved_to(Transition::GoTo(NodeId::Village))
    }

    #[test]
    fn one_correct_answer() {
        let choices = spec().choices();
        assert_eq!(choices.len(), 3);

        let correct = &choices[2].branches[0];
        assert_eq!(correct.transition, Transition::GoTo(NodeId::Village));
        assert!(correct.effects.contains(&Effect::SolvePuzzle(Puzzle::DoorSymbol)));
        assert!(correct.effects.contains(&Effect::GiveItem(Item::RustyKey)));

        for wrong in &choices[..2] {
            let branch = &wrong.branches[0];
            assert_eq!(branch.transition, Transition::Stay);
            assert_eq!(branch.effects, vec![Effect::Damage(15)]);
        }
    }

    #[test]
    fn solving_twice_changes_nothing() {
        let spec = spec();
        let branch = spec.solved_branch("again");
        let mut state = SessionState::new();
        for effect in &branch.effects {
            effect.apply(&mut state);
        }
        let after_first = state.clone();
        for effect in &branch.effects {
            assert_eq!(effect.apply(&mut state), None);
        }
        assert_eq!(state, after_first);
        assert!(spec.solved_condition().evaluate(&state));
    }

    #[test]
    fn node_layout() {
        let node = spec().into_node(
            Node::new(NodeId::OldHouse, "House", "A door."),
            vec![Choice::new("Knock", "Nothing.")],
            "Back",
            Transition::GoTo(NodeId::Village),
        );
        let labels: Vec<_> = node.choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Knock", "Moon", "Sun", "Balance", "Back"]);
        assert!(node.choices[4].back);
    }
}
