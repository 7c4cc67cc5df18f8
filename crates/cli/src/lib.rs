//! Shell Cuts CLI Library
//!
//! This crate provides the command-line interface for shell-cuts. It manages
//! contexts, creates, edits and deletes command files, syncs them with git,
//! and runs them by name with their parameters resolved from piped input,
//! flags and prompts.
//!
//! # Architecture
//!
//! - [`cli_args`]: Static command-line argument parsing
//! - [`registry`]: The dynamic `run` subcommands, one per command file
//! - [`handlers`]: One handler per subcommand
//! - [`piped_input`]: Values piped into `scut run`
//! - [`terminal`]: Prompts, tables and colored messages
//!
//! # Examples
//!
//! The CLI binary (`scut`) is used like this:
//!
//! ```bash
//! # Set up the default context
//! scut init
//!
//! # Create a command file with one parameter
//! scut new --name greet --desc "Say hello" --param "name, Who to greet, World"
//!
//! # List, then run it
//! scut list
//! scut run greet --name Alice
//! echo Bob | scut run greet
//!
//! # Work in another context
//! scut -c work list
//! ```

pub mod cli_args;
pub mod handlers;
pub mod piped_input;
pub mod registry;
pub mod terminal;
