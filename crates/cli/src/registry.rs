//! Dynamic `run` subcommands.
//!
//! Each discovered command file becomes a subcommand of `run`, named after
//! the file, with one `--<name>` flag per declared parameter. The flags
//! default to the parameters' declared defaults, so every flag carries some
//! value whether or not the user typed it.

use std::collections::HashMap;
use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command};
use indexmap::IndexMap;
use log::{debug, warn};
use shell_cuts_core::command_file::{CommandFile, CommandFileParam};

/// Flag names that clap already uses on every subcommand.
const RESERVED_FLAGS: [&str; 1] = ["help"];

/// A command file chosen on the command line, with its flag values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub command_file: CommandFile,
    pub flag_values: HashMap<String, String>,
}

/// Name to command file table for one context.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: IndexMap<String, CommandFile>,
}

impl Registry {
    /// Registers `command_files` in listing order. A later file with the same
    /// name replaces an earlier one.
    #[must_use]
    pub fn new(command_files: Vec<CommandFile>) -> Self {
        let mut commands = IndexMap::new();

        for command_file in command_files {
            if command_file.f_name.is_empty() {
                warn!("Ignoring unnamed command file `{}`", command_file.path.display());
                continue;
            }

            if let Some(previous) = commands.insert(command_file.f_name.clone(), command_file) {
                debug!("Command file `{}` is shadowed", previous.path.display());
            }
        }

        Self { commands }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandFile> {
        self.commands.get(name)
    }

    /// The `run` command with one subcommand per registered command file.
    #[must_use]
    pub fn command(&self) -> Command {
        Command::new("run")
            .about("Run command")
            .term_width(0)
            .disable_help_subcommand(true)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommands(self.commands.values().map(build_subcommand))
    }

    /// Parses `args`, the words following `run`.
    ///
    /// # Errors
    ///
    /// Returns a clap error for unknown commands, unknown flags, or when help
    /// was requested.
    pub fn parse<I, T>(&self, args: I) -> clap::error::Result<Selection>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = std::iter::once(OsString::from("run")).chain(args.into_iter().map(Into::into));
        let matches = self.command().try_get_matches_from(args)?;

        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(self
                .command()
                .error(clap::error::ErrorKind::MissingSubcommand, "A command name is required"));
        };

        let Some(command_file) = self.commands.get(name) else {
            return Err(self.command().error(
                clap::error::ErrorKind::InvalidSubcommand,
                format!("Unknown command `{name}`"),
            ));
        };

        Ok(Selection {
            flag_values: collect_flag_values(command_file, sub_matches),
            command_file: command_file.clone(),
        })
    }
}

/// Whether `name` can be exposed as a `--<name>` flag.
fn is_flag_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains(|c: char| c == '=' || c.is_whitespace())
        && !RESERVED_FLAGS.contains(&name)
}

/// Distinct flag-capable parameters; the last declaration of a name wins.
fn flag_params(command_file: &CommandFile) -> IndexMap<&str, &CommandFileParam> {
    let mut params = IndexMap::new();

    for param in &command_file.params {
        if is_flag_name(&param.name) {
            params.insert(param.name.as_str(), param);
        } else {
            debug!(
                "Parameter `{}` of `{}` has no flag",
                param.name, command_file.f_name
            );
        }
    }

    params
}

fn build_subcommand(command_file: &CommandFile) -> Command {
    let mut command = Command::new(command_file.f_name.clone());

    if !command_file.desc.is_empty() {
        command = command.about(command_file.desc.clone());
    }

    for (name, param) in flag_params(command_file) {
        let mut arg = Arg::new(name.to_string())
            .long(name.to_string())
            .action(ArgAction::Set)
            .help(param.message.clone());

        if !param.default.is_empty() {
            arg = arg.default_value(param.default.clone());
        }

        command = command.arg(arg);
    }

    command
}

fn collect_flag_values(command_file: &CommandFile, matches: &ArgMatches) -> HashMap<String, String> {
    flag_params(command_file)
        .into_keys()
        .filter_map(|name| {
            matches
                .get_one::<String>(name)
                .map(|value| (name.to_string(), value.clone()))
        })
        .collect()
}
