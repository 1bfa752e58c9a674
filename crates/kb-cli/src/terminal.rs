//! A line-oriented shell over any reader and writer.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use kb_core::{CoreError, CoreResult, STARTING_HEALTH, SessionState, Shell};
use tracing::trace;

const RULE: &str = "============================================================";

/// Prints narration with optional typewriter pacing and reads numbered
/// answers. Menus are shown 1-based.
pub struct TerminalShell<R, W> {
    input: R,
    output: W,
    delay: Duration,
    failed: Option<io::Error>,
}

impl<R: BufRead, W: Write> TerminalShell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            delay: Duration::ZERO,
            failed: None,
        }
    }

    /// Pause this long after each character of narration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        if self.delay.is_zero() {
            writeln!(self.output, "{text}")?;
        } else {
            let mut buf = [0; 4];
            for c in text.chars() {
                self.output.write_all(c.encode_utf8(&mut buf).as_bytes())?;
                self.output.flush()?;
                thread::sleep(self.delay);
            }
            writeln!(self.output)?;
        }
        writeln!(self.output)?;
        self.output.flush()
    }

    fn remember(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.failed.get_or_insert(e);
        }
    }

    fn write_menu(&mut self, options: &[String]) -> io::Result<()> {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {option}", (i + 1).to_string().bold())?;
        }
        write!(self.output, "\nYour choice: ")?;
        self.output.flush()
    }

    /// Parse a 1-based answer into a 0-based index.
    fn parse(line: &str, count: usize) -> Option<usize> {
        line.trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=count).contains(n))
            .map(|n| n - 1)
    }
}

impl<R: BufRead, W: Write> Shell for TerminalShell<R, W> {
    fn present(&mut self, text: &str) {
        let result = self.write_text(text);
        self.remember(result);
    }

    fn choose(&mut self, options: &[String]) -> CoreResult<usize> {
        if let Some(e) = self.failed.take() {
            return Err(e.into());
        }
        loop {
            self.write_menu(options)?;
            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                writeln!(self.output)?;
                return Err(CoreError::InputClosed);
            }
            writeln!(self.output)?;
            let line = String::from_utf8_lossy(&raw);
            if let Some(index) = Self::parse(&line, options.len()) {
                return Ok(index);
            }
            trace!(answer = line.trim(), "rejected menu answer");
            writeln!(
                self.output,
                "{}",
                format!("Enter a number from 1 to {}.", options.len()).red()
            )?;
        }
    }

    fn show_status(&mut self, state: &SessionState) {
        let health = state.health();
        let hp = format!("HP: {health}/{STARTING_HEALTH}");
        let hp = match health {
            h if h <= 30 => hp.red(),
            h if h <= 60 => hp.yellow(),
            _ => hp.green(),
        };
        let items: Vec<&str> = state.inventory().map(|i| i.display_name()).collect();
        let inventory = if items.is_empty() {
            "(empty)".to_string()
        } else {
            items.join(", ")
        };
        let result = writeln!(
            self.output,
            "{RULE}\n{hp}\nInventory: {inventory}\n{RULE}"
        );
        self.remember(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::{Fact, Item};

    fn shell(input: &str) -> TerminalShell<&[u8], Vec<u8>> {
        colored::control::set_override(false);
        TerminalShell::new(input.as_bytes(), Vec::new())
    }

    fn options() -> Vec<String> {
        vec!["North".to_string(), "South".to_string()]
    }

    #[test]
    fn answers_are_one_based() {
        let mut shell = shell("2\n");
        assert_eq!(shell.choose(&options()).unwrap(), 1);
        let out = String::from_utf8(shell.output).unwrap();
        assert!(out.contains("1. North"));
        assert!(out.contains("2. South"));
    }

    #[test]
    fn reprompts_until_valid() {
        let mut shell = shell("zero\n0\n3\n 1 \n");
        assert_eq!(shell.choose(&options()).unwrap(), 0);
        let out = String::from_utf8(shell.output).unwrap();
        assert_eq!(out.matches("Enter a number from 1 to 2.").count(), 3);
    }

    #[test]
    fn undecodable_answer_reprompts() {
        colored::control::set_override(false);
        let mut shell = TerminalShell::new(&b"\xff\xfe\n2\n"[..], Vec::new());
        assert_eq!(shell.choose(&options()).unwrap(), 1);
        let out = String::from_utf8(shell.output).unwrap();
        assert_eq!(out.matches("Enter a number from 1 to 2.").count(), 1);
    }

    #[test]
    fn end_of_input_closes() {
        let mut shell = shell("");
        assert!(matches!(shell.choose(&options()), Err(CoreError::InputClosed)));
    }

    #[test]
    fn status_lists_inventory() {
        let mut shell = shell("");
        let mut state = SessionState::new();
        shell.show_status(&state);
        state.set(Fact::Item(Item::Torch));
        shell.show_status(&state);
        let out = String::from_utf8(shell.output).unwrap();
        assert!(out.contains("HP: 100/100"));
        assert!(out.contains("Inventory: (empty)"));
        assert!(out.contains("Inventory: Old Torch"));
    }

    #[test]
    fn typewriter_keeps_the_text() {
        let mut shell = shell("").with_delay(Duration::from_millis(1));
        shell.present("fog");
        assert_eq!(String::from_utf8(shell.output).unwrap(), "fog\n\n");
    }
}
