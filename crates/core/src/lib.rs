//! Shell Cuts Core Library
//!
//! This crate provides the core functionality for shell-cuts, a personal
//! command launcher that keeps small shell scripts in a directory tree and
//! runs them by name, feeding their declared parameters on standard input.
//!
//! # Key Features
//!
//! - **Command Files**: Parse `#DESC` and `#PARAM` metadata comments from scripts
//! - **Repository**: Discover, filter and create command files under a root directory
//! - **Parameter Resolution**: Merge piped input, CLI flags and prompts into final values
//! - **Invocation**: Run a script with its resolved values on standard input
//! - **Contexts**: Named profiles mapping to storage roots, optionally synced with git
//!
//! # Examples
//!
//! Listing the command files of a repository root:
//!
//! ```no_run
//! use std::path::Path;
//! use shell_cuts_core::repository::get_list;
//!
//! let commands = get_list(Path::new("/home/me/.shell-cuts/commands"), "deploy")?;
//! for command in &commands {
//!     println!("{}: {}", command.root_name, command);
//! }
//! # Ok::<(), shell_cuts_core::error::Error>(())
//! ```

pub mod command_file;
pub mod config;
pub mod error;
pub mod interaction;
pub mod invocation;
pub mod repository;
pub mod resolution;
pub mod vcs;
