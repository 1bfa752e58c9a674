//! The contract between the engine and whatever presents it.

use crate::error::{CoreError, CoreResult};
use crate::state::SessionState;

/// The I/O shell around the engine.
///
/// The engine emits narrative through [`present`](Shell::present) and asks
/// for decisions through [`choose`](Shell::choose). Indices are 0-based. A
/// shell is expected to re-prompt on bad input itself and only return an
/// index inside `options`.
pub trait Shell {
    /// Show a block of narrative text. Pacing is up to the shell; content
    /// must not be altered.
    fn present(&mut self, text: &str);

    /// Ask the player to pick one of `options` and return its 0-based index.
    fn choose(&mut self, options: &[String]) -> CoreResult<usize>;

    /// Show the player's health and inventory. Optional.
    fn show_status(&mut self, _state: &SessionState) {}
}

/// Ask the shell to choose and reject indices outside `options`.
pub fn choose_checked(shell: &mut dyn Shell, options: &[String]) -> CoreResult<usize> {
    let index = shell.choose(options)?;
    if index < options.len() {
        Ok(index)
    } else {
        Err(CoreError::InvalidChoice {
            index,
            available: options.len(),
        })
    }
}
