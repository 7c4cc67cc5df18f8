//! Terminal implementation of the interaction surface.
//!
//! Prompts read from standard input and messages go to standard output.
//! Colors and attributes are only emitted when standard output is a
//! terminal.

pub mod colors;
pub mod input;
pub mod table;

use std::io::{stdin, stdout};

use crossterm::tty::IsTty;
use shell_cuts_core::command_file::CommandFile;
use shell_cuts_core::error::Result;
use shell_cuts_core::interaction::Interaction;

pub use table::Table;

/// Interaction through the user's terminal.
pub struct Terminal {
    colored: bool,
}

impl Terminal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            colored: stdout().is_tty(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for Terminal {
    fn prompt(&mut self, message: &str, default: &str) -> Result<String> {
        input::prompt_value(&mut stdin().lock(), &mut stdout(), message, default, self.colored)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        input::confirm(&mut stdin().lock(), &mut stdout(), message, self.colored)
    }

    fn show_commands(&mut self, commands: &[CommandFile]) -> Result<()> {
        Table::for_commands(commands).print(&mut stdout(), self.colored)
    }

    fn select_command(&mut self, commands: &[CommandFile]) -> Result<usize> {
        self.show_commands(commands)?;
        input::select_line(&mut stdin().lock(), &mut stdout(), commands.len(), self.colored)
    }

    fn info(&mut self, message: &str) {
        colors::print_styled(&mut stdout(), message, colors::INFO, self.colored);
    }

    fn warn(&mut self, message: &str) {
        colors::print_styled(&mut stdout(), message, colors::WARNING, self.colored);
    }
}
