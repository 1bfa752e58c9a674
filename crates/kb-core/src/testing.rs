//! Deterministic doubles for the engine hooks.

use std::collections::VecDeque;

use crate::error::{CoreError, CoreResult};
use crate::rng::RandomSource;
use crate::shell::Shell;
use crate::state::SessionState;

/// A source that always returns the bottom (or top) of the requested range.
#[derive(Debug, Clone, Copy)]
pub enum FixedRng {
    /// Always `low`.
    Min,
    /// Always `high`.
    Max,
}

impl RandomSource for FixedRng {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        match self {
            Self::Min => low,
            Self::Max => high,
        }
    }
}

/// A source that replays a fixed sequence, ignoring the requested range.
///
/// Panics once the sequence is exhausted, so a test can assert that no
/// further draws happen.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: VecDeque<u32>,
}

impl SequenceRng {
    /// Create a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for SequenceRng {
    fn range(&mut self, _low: u32, _high: u32) -> u32 {
        self.values.pop_front().expect("SequenceRng exhausted")
    }
}

/// A shell that answers from a queue of choices and records everything.
#[derive(Debug, Clone, Default)]
pub struct ScriptedShell {
    choices: VecDeque<usize>,
    /// Every block of text presented, in order.
    pub transcript: Vec<String>,
    /// Every menu offered, in order.
    pub menus: Vec<Vec<String>>,
}

impl ScriptedShell {
    /// Create a shell that will answer with `choices` (0-based) in order.
    pub fn new(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            transcript: Vec::new(),
            menus: Vec::new(),
        }
    }

    /// Queue more answers.
    pub fn push(&mut self, choice: usize) {
        self.choices.push_back(choice);
    }

    /// True if any presented text contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|t| t.contains(needle))
    }

    /// How many presented blocks contain `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.transcript.iter().filter(|t| t.contains(needle)).count()
    }

    /// The most recent menu, if any.
    pub fn last_menu(&self) -> Option<&[String]> {
        self.menus.last().map(Vec::as_slice)
    }
}

impl Shell for ScriptedShell {
    fn present(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn choose(&mut self, options: &[String]) -> CoreResult<usize> {
        self.menus.push(options.to_vec());
        self.choices.pop_front().ok_or(CoreError::InputClosed)
    }

    fn show_status(&mut self, state: &SessionState) {
        self.transcript.push(format!("[HP {}]", state.health()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rng_bounds() {
        assert_eq!(FixedRng::Min.range(5, 15), 5);
        assert_eq!(FixedRng::Max.range(5, 15), 15);
    }

    #[test]
    fn sequence_rng_replays() {
        let mut rng = SequenceRng::new([3, 9]);
        assert_eq!(rng.range(0, 100), 3);
        assert_eq!(rng.range(0, 100), 9);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn sequence_rng_panics_when_empty() {
        let mut rng = SequenceRng::new(Vec::<u32>::new());
        rng.range(1, 2);
    }

    #[test]
    fn scripted_shell_runs_dry() {
        let mut shell = ScriptedShell::new([1]);
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(shell.choose(&options).unwrap(), 1);
        assert!(matches!(shell.choose(&options), Err(CoreError::InputClosed)));
        assert_eq!(shell.menus.len(), 2);
    }
}
