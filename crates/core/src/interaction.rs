//! User interaction surface consumed by the core operations.

use crate::command_file::CommandFile;
use crate::error::Result;

/// Blocking user interaction. The terminal implementation lives in the CLI
/// crate; tests use scripted implementations.
pub trait Interaction {
    /// Asks for a value. Accepting without typing returns `default`, which may
    /// be empty.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the answer fails.
    fn prompt(&mut self, message: &str, default: &str) -> Result<String>;

    /// Asks a yes/no question, answering no by default.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the answer fails.
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Displays a listing of command files.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    fn show_commands(&mut self, commands: &[CommandFile]) -> Result<()>;

    /// Lets the user pick one of `commands`, returning its index.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the answer fails.
    fn select_command(&mut self, commands: &[CommandFile]) -> Result<usize>;

    fn info(&mut self, message: &str);

    fn warn(&mut self, message: &str);
}
