//! The main menu and the play loop.

use std::io;
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use kb_core::{CoreError, Shell, choose_checked};
use kb_fiction::content::TITLE;
use kb_fiction::{FictionError, SessionConfig, SessionEnd, StorySession};
use tracing::{debug, info};

use crate::terminal::TerminalShell;

const ABOUT: &str = "\
ABOUT

Whispers from the Fog is a text adventure of light mystery and horror.

You wake in a village wrapped in thick fog. The villagers speak in strange
riddles. An ancient ritual binds the village to a mysterious creature, and
you are part of it. The choices you make will change your fate, and the
world's.

- Four different endings
- Health and inventory
- Turn-based fights
- Puzzles and riddles";

const MENU: [&str; 3] = ["Start a new game", "About", "Quit"];

/// Run the main menu on stdin and stdout until the player quits or input
/// ends.
pub fn run(
    seed: Option<u64>,
    config: Option<&Path>,
    text_delay: u64,
    no_color: bool,
) -> Result<(), String> {
    if no_color {
        colored::control::set_override(false);
    }
    let mut config = super::load_config(config)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut shell = TerminalShell::new(io::stdin().lock(), io::stdout().lock())
        .with_delay(Duration::from_millis(text_delay));
    main_menu(&config, &mut shell)
}

fn main_menu(config: &SessionConfig, shell: &mut dyn Shell) -> Result<(), String> {
    let options: Vec<String> = MENU.iter().map(ToString::to_string).collect();
    loop {
        shell.present(&banner());
        let choice = match choose_checked(shell, &options) {
            Ok(choice) => choice,
            Err(CoreError::InputClosed) => return Ok(()),
            Err(e) => return Err(e.to_string()),
        };
        match choice {
            0 => {
                if !new_game(config, shell)? {
                    return Ok(());
                }
            }
            1 => shell.present(ABOUT),
            _ => {
                shell.present("Thank you for playing. Until the fog lifts again.");
                return Ok(());
            }
        }
    }
}

fn banner() -> String {
    format!(
        "{}\n{}\n{}",
        "=".repeat(60),
        format!("{TITLE:^60}").bold(),
        "=".repeat(60)
    )
}

/// Play one session from a fresh state. Returns false if input ran out.
fn new_game(config: &SessionConfig, shell: &mut dyn Shell) -> Result<bool, String> {
    let mut session = StorySession::new(config.clone()).map_err(|e| e.to_string())?;
    info!(seed = ?config.seed, "new game");

    let end = match session.run(shell) {
        Ok(end) => end,
        Err(FictionError::Shell(CoreError::InputClosed)) => {
            debug!("input closed mid-game");
            return Ok(false);
        }
        Err(e) => return Err(e.to_string()),
    };

    let summary = match end {
        SessionEnd::Ending(ending) => format!("THE END: {}", ending.title()),
        SessionEnd::Fallen => "THE END".to_string(),
        SessionEnd::Abandoned => "You turn away from the fog, for now.".to_string(),
    };
    shell.present(&summary.bold().to_string());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::testing::ScriptedShell;

    #[test]
    fn about_then_quit() {
        let mut shell = ScriptedShell::new([1, 2]);
        main_menu(&SessionConfig::default(), &mut shell).unwrap();
        assert!(shell.saw("Four different endings"));
        assert!(shell.saw("Thank you for playing"));
        assert_eq!(shell.menus.len(), 2);
    }

    #[test]
    fn abandoning_returns_to_the_menu() {
        colored::control::set_override(false);
        // Start, return to the main menu from the crossroads, quit.
        let mut shell = ScriptedShell::new([0, 4, 2]);
        main_menu(&SessionConfig::default().with_seed(1), &mut shell).unwrap();
        assert!(shell.saw("Your eyes open in darkness"));
        assert!(shell.saw("You turn away from the fog"));
        assert_eq!(shell.count(TITLE), 3);
    }

    #[test]
    fn closed_input_is_not_an_error() {
        let mut shell = ScriptedShell::new([0, 0]);
        assert!(main_menu(&SessionConfig::default(), &mut shell).is_ok());
        assert!(!shell.saw("Thank you for playing"));
    }
}
