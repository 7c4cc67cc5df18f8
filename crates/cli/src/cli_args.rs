//! Command-line argument parsing.
//!
//! This module defines the static part of the command-line interface using
//! the `clap` derive API. The subcommands of `run` depend on the command
//! files of the selected context and are built at runtime by
//! [`crate::registry`].

use clap::{Parser, Subcommand};
use shell_cuts_core::config::DEFAULT_CONTEXT;

/// Command-line arguments for the shell-cuts CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use shell_cuts_cli::cli_args::Args;
///
/// let args = Args::parse_from(["scut", "list", "deploy"]);
/// ```
#[derive(Parser, Debug)]
#[command(version, about = "Shell script manager", term_width = 0)]
pub struct Args {
    /// Section of the config file to load.
    #[arg(long, short = 'c', default_value = DEFAULT_CONTEXT)]
    pub context: String,

    /// Path to the contexts config file YAML.
    ///
    /// If not provided, defaults to `~/.shell-cuts/config.yml`.
    #[arg(long)]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Initialize the application for the current context
    Init {
        /// Path where the command files are stored.
        ///
        /// Defaults to `~/.shell-cuts/commands`, suffixed with the context name
        /// for contexts other than `DEFAULT`.
        #[arg(long)]
        path: Option<String>,

        /// Edit the configuration file instead
        #[arg(long, action)]
        edit: bool,
    },

    /// Initialize git for the current context
    InitGit {
        /// Git repository
        #[arg(long, default_value = "")]
        repo: String,

        /// Git username
        #[arg(long, default_value = "")]
        user: String,

        /// Git email
        #[arg(long, default_value = "")]
        mail: String,

        /// Git branch
        #[arg(long, default_value = "")]
        branch: String,

        /// Pull an existing git repository
        #[arg(long, action)]
        pull: bool,
    },

    /// List commands
    List {
        #[arg(default_value = "")]
        filter: String,
    },

    /// Edit command
    Edit {
        #[arg(default_value = "")]
        filter: String,
    },

    /// New command
    New {
        /// Command name
        #[arg(long, default_value = "")]
        name: String,

        /// Command description
        #[arg(long, default_value = "")]
        desc: String,

        /// Command parameter, as `name, message, default, ask_always`.
        ///
        /// Repeat for several parameters.
        #[arg(long = "param", action = clap::ArgAction::Append)]
        params: Vec<String>,
    },

    /// Delete command
    Delete {
        #[arg(default_value = "")]
        filter: String,
    },

    /// Git commands
    #[command(subcommand)]
    Git(GitCommand),

    /// Run command
    #[command(disable_help_flag = true)]
    Run {
        /// Command name followed by its `--<param>` flags.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GitCommand {
    /// Git status
    Status,
    /// Git pull
    Pull,
    /// Git push
    Push,
    /// Git pull then git push
    Sync,
}
