//! Subcommand handlers.
//!
//! Each handler works on an already loaded [`Profile`] (except the two init
//! handlers, which create one) and talks to the user only through the
//! [`Interaction`] surface, so the whole flow can run against a scripted fake.

use std::fs;

use log::{debug, info};
use shell_cuts_core::command_file::SCRIPT_EXTENSION;
use shell_cuts_core::config::{default_storage_path, Profile, ProfileStore, DEFAULT_BRANCH};
use shell_cuts_core::error::{Error, Result};
use shell_cuts_core::interaction::Interaction;
use shell_cuts_core::invocation::{edit_file, Invocation};
use shell_cuts_core::repository::{create, get_list, select_one};
use shell_cuts_core::resolution::resolve_values;
use shell_cuts_core::vcs::{Git, VcsHook};

use crate::cli_args::GitCommand;
use crate::registry::Selection;

const GIT_ATTRIBUTES_FILE: &str = ".gitattributes";
const GIT_ATTRIBUTES: &str = "*.sh diff=sh";

/// Values given to `init-git` on the command line; empty ones are prompted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOptions {
    pub repo: String,
    pub user: String,
    pub mail: String,
    pub branch: String,
    pub pull: bool,
}

/// Returns `value` trimmed, prompting for it when empty.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the value is still empty after the
/// prompt.
pub fn prompt_required<I: Interaction + ?Sized>(
    interaction: &mut I,
    value: &str,
    message: &str,
    default: &str,
) -> Result<String> {
    let mut value = value.trim().to_string();

    if value.is_empty() {
        value = interaction.prompt(message, default)?.trim().to_string();
    }

    if value.is_empty() {
        return Err(Error::InvalidInput(message.to_string()));
    }

    Ok(value)
}

/// Runs the commit hook when git is enabled for the profile.
fn notify_vcs<V: VcsHook + ?Sized>(profile: &Profile, vcs: &V, message: &str) -> Result<()> {
    if profile.git.enabled {
        vcs.commit(&profile.root(), message, &profile.git.branch)
    } else {
        debug!("Git disabled, not committing `{message}`");
        Ok(())
    }
}

fn stored_or_default<S: ProfileStore + ?Sized>(store: &S, context: &str) -> Result<Profile> {
    match store.load(context)? {
        Some(profile) => Ok(profile),
        None => {
            let mut profile = store.create();
            profile.path = default_storage_path(context);
            Ok(profile)
        }
    }
}

fn create_root(profile: &Profile) -> Result<()> {
    let root = profile.root();
    fs::create_dir_all(&root).map_err(|e| {
        Error::io_error(
            "storage directory".to_string(),
            root.display().to_string(),
            e,
        )
    })
}

/// Saves `context` with its storage path and creates the directory.
///
/// # Errors
///
/// Returns an error if the path is empty after prompting, or if the
/// directory or the profile cannot be written.
pub fn init<S, I>(store: &S, interaction: &mut I, context: &str, path: Option<&str>) -> Result<Profile>
where
    S: ProfileStore + ?Sized,
    I: Interaction + ?Sized,
{
    let default_path = default_storage_path(context);
    let path = prompt_required(interaction, path.unwrap_or(default_path.as_str()), "Path", "")?;

    let mut profile = stored_or_default(store, context)?;
    profile.path = path;
    create_root(&profile)?;
    store.save(context, &profile)?;

    info!("Context `{context}` stored at `{}`", profile.path);
    interaction.info("Application initialized");
    Ok(profile)
}

/// Enables git for `context` and sets up its repository.
///
/// # Errors
///
/// Returns an error if a required value is empty, if the profile or the
/// attributes file cannot be written, or if a git command fails.
pub fn init_git<S, I>(
    store: &S,
    git: &Git,
    interaction: &mut I,
    context: &str,
    options: &GitOptions,
) -> Result<Profile>
where
    S: ProfileStore + ?Sized,
    I: Interaction + ?Sized,
{
    let mut profile = stored_or_default(store, context)?;
    profile.git.enabled = true;
    profile.git.remote = prompt_required(interaction, &options.repo, "Git repository", "")?;
    profile.git.user = prompt_required(interaction, &options.user, "Git username", "")?;
    profile.git.email = prompt_required(interaction, &options.mail, "Git email", "")?;
    profile.git.branch = prompt_required(interaction, &options.branch, "Git branch", DEFAULT_BRANCH)?;
    store.save(context, &profile)?;

    create_root(&profile)?;
    if !options.pull {
        let attributes = profile.root().join(GIT_ATTRIBUTES_FILE);
        fs::write(&attributes, GIT_ATTRIBUTES).map_err(|e| {
            Error::io_error(
                "git attributes".to_string(),
                attributes.display().to_string(),
                e,
            )
        })?;
    }

    git.init(&profile.root(), &profile.git, options.pull)?;
    interaction.info("Git initialized");
    Ok(profile)
}

/// Shows the command files matching `filter`, then the storage path.
///
/// # Errors
///
/// Returns an error if the storage root cannot be listed.
pub fn list<I: Interaction + ?Sized>(profile: &Profile, interaction: &mut I, filter: &str) -> Result<()> {
    let items = get_list(&profile.root(), filter)?;
    interaction.show_commands(&items)?;
    interaction.info(&profile.path);
    Ok(())
}

/// Opens the selected command file in `editor`.
///
/// # Errors
///
/// Returns an error if no file matches, if the editor fails, or if the
/// commit hook fails.
pub fn edit<V, I>(profile: &Profile, vcs: &V, interaction: &mut I, filter: &str, editor: &str) -> Result<()>
where
    V: VcsHook + ?Sized,
    I: Interaction + ?Sized,
{
    let items = get_list(&profile.root(), filter)?;
    let command_file = select_one(items, filter, interaction)?;

    edit_file(editor, &command_file.path)?;
    notify_vcs(
        profile,
        vcs,
        &format!("Update command file <{}>", command_file.f_name),
    )?;

    interaction.info("File edited");
    Ok(())
}

/// Creates `<name>.sh` at the storage root.
///
/// # Errors
///
/// Returns [`Error::CommandFileExists`] if the file is already there, an
/// error if the name or description is empty after prompting, or if writing
/// the file or the commit hook fails.
pub fn new<V, I>(
    profile: &Profile,
    vcs: &V,
    interaction: &mut I,
    name: &str,
    desc: &str,
    params: &[String],
) -> Result<()>
where
    V: VcsHook + ?Sized,
    I: Interaction + ?Sized,
{
    let name = prompt_required(interaction, name, "Command name", "")?;
    let path = profile.root().join(format!("{name}{SCRIPT_EXTENSION}"));
    if path.exists() {
        return Err(Error::CommandFileExists(path.display().to_string()));
    }

    let desc = prompt_required(interaction, desc, "Command description", "")?;
    create(&path, &desc, params)?;
    notify_vcs(profile, vcs, &format!("Create command file <{name}>"))?;

    interaction.info("File created");
    Ok(())
}

/// Removes the selected command file after confirmation.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] if the user declines, or an error if no file
/// matches, the removal fails, or the commit hook fails.
pub fn delete<V, I>(profile: &Profile, vcs: &V, interaction: &mut I, filter: &str) -> Result<()>
where
    V: VcsHook + ?Sized,
    I: Interaction + ?Sized,
{
    let items = get_list(&profile.root(), filter)?;
    let command_file = select_one(items, filter, interaction)?;

    if !interaction.confirm("Delete command file")? {
        return Err(Error::Cancelled(
            "Command deletion has been cancelled".to_string(),
        ));
    }

    fs::remove_file(&command_file.path).map_err(|e| {
        Error::io_error(
            "command".to_string(),
            command_file.path.display().to_string(),
            e,
        )
    })?;
    notify_vcs(
        profile,
        vcs,
        &format!("Delete command file <{}>", command_file.f_name),
    )?;

    interaction.info("File deleted");
    Ok(())
}

/// Runs a git subcommand on the storage root.
///
/// # Errors
///
/// Returns an error if git fails.
pub fn git(profile: &Profile, git: &Git, command: GitCommand) -> Result<()> {
    let root = profile.root();
    let branch = &profile.git.branch;

    match command {
        GitCommand::Status => git.status(&root),
        GitCommand::Pull => git.pull(&root, branch),
        GitCommand::Push => git.push(&root, branch),
        GitCommand::Sync => git.sync(&root, branch),
    }
}

/// Resolves the parameters of the selected command file and runs it.
///
/// # Errors
///
/// Returns [`Error::NoMatchingCommand`] if the file disappeared since it was
/// listed, a resolution error, or an error if the script fails.
pub fn run<I: Interaction + ?Sized>(
    selection: &Selection,
    stdin_values: &[String],
    interaction: &mut I,
) -> Result<()> {
    let command_file = &selection.command_file;
    if !command_file.path.is_file() {
        return Err(Error::NoMatchingCommand(command_file.f_name.clone()));
    }

    let values = resolve_values(
        &command_file.params,
        stdin_values,
        &selection.flag_values,
        interaction,
    )?;

    Invocation::assemble(command_file, values).execute()
}
