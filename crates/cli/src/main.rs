use std::io::{stderr, stdin};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use crossterm::tty::IsTty;
use log::debug;
use shell_cuts_core::config::{
    get_config_path, get_editor, load_initialized, Profile, YamlProfileStore,
};
use shell_cuts_core::error::Result;
use shell_cuts_core::interaction::Interaction;
use shell_cuts_core::invocation::edit_file;
use shell_cuts_core::repository::get_list;
use shell_cuts_core::vcs::Git;

use shell_cuts_cli::cli_args::{Args, Commands};
use shell_cuts_cli::handlers::{self, GitOptions};
use shell_cuts_cli::piped_input::piped_values;
use shell_cuts_cli::registry::Registry;
use shell_cuts_cli::terminal::{colors, Terminal};

const EXIT_ERROR: u8 = 2;

/// Loads an initialised context, warning when it has no git set up.
fn load_profile(store: &YamlProfileStore, terminal: &mut Terminal, context: &str) -> Result<Profile> {
    let profile = load_initialized(store, context)?;
    if !profile.git.enabled {
        terminal.warn("WARNING: Git is not configured");
    }
    Ok(profile)
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let context = args.context.as_str();

    let store = YamlProfileStore::new(get_config_path(&args.config_path));
    debug!("Config path: `{}`", store.path());

    let mut terminal = Terminal::new();
    let git = Git::default();

    match args.command {
        Commands::Init { edit: true, .. } => edit_file(&get_editor(), Path::new(store.path())),
        Commands::Init { path, .. } => {
            handlers::init(&store, &mut terminal, context, path.as_deref()).map(|_| ())
        }
        Commands::InitGit {
            repo,
            user,
            mail,
            branch,
            pull,
        } => {
            let options = GitOptions {
                repo,
                user,
                mail,
                branch,
                pull,
            };
            handlers::init_git(&store, &git, &mut terminal, context, &options).map(|_| ())
        }
        Commands::Run { args: run_args } => {
            let profile = load_initialized(&store, context)?;
            let registry = Registry::new(get_list(&profile.root(), "")?);
            debug!("{} commands registered", registry.len());

            // Help and usage errors exit here, as clap does for static commands
            let selection = registry.parse(run_args).unwrap_or_else(|e| e.exit());

            let stdin_values = piped_values(stdin(), selection.command_file.params.len())?;

            handlers::run(&selection, &stdin_values, &mut terminal)
        }
        Commands::List { filter } => {
            let profile = load_profile(&store, &mut terminal, context)?;
            handlers::list(&profile, &mut terminal, &filter)
        }
        Commands::Edit { filter } => {
            let profile = load_profile(&store, &mut terminal, context)?;
            handlers::edit(&profile, &git, &mut terminal, &filter, &get_editor())
        }
        Commands::New { name, desc, params } => {
            let profile = load_profile(&store, &mut terminal, context)?;
            handlers::new(&profile, &git, &mut terminal, &name, &desc, &params)
        }
        Commands::Delete { filter } => {
            let profile = load_profile(&store, &mut terminal, context)?;
            handlers::delete(&profile, &git, &mut terminal, &filter)
        }
        Commands::Git(git_command) => {
            let profile = load_profile(&store, &mut terminal, context)?;
            handlers::git(&profile, &git, git_command)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut stderr = stderr();
            let colored = stderr.is_tty();
            colors::print_styled(&mut stderr, &format!("ERROR: {e}"), colors::ERROR, colored);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
