//! Discovery and creation of command files under a repository root.
//!
//! Listings are rebuilt from the filesystem on every call, so a listing may go
//! stale if files change before the caller acts on it.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::command_file::{CommandFile, DESC_MARKER, PARAM_MARKER, SCRIPT_EXTENSION};
use crate::error::{Error, Result};
use crate::interaction::Interaction;

/// Directory name reserved for version control metadata.
pub const VCS_DIRECTORY: &str = ".git";

const INTERPRETER_LINE: &str = "#!/bin/bash";
const PLACEHOLDER_BODY: &str = "echo \"Hello World!\"";

/// rwxrwxr-x
#[cfg(unix)]
const COMMAND_FILE_MODE: u32 = 0o775;

fn get_writer_error(path: &Path, e: std::io::Error) -> Error {
    Error::io_error("command".to_string(), path.display().to_string(), e)
}

/// Writes a new command file with boilerplate content and makes it executable.
///
/// `params` are raw `#PARAM` contents and are written as given. The caller is
/// responsible for making sure `path` does not already exist.
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be written, or
/// if the permissions cannot be set.
pub fn create(path: &Path, description: &str, params: &[String]) -> Result<()> {
    let mut content = format!("{INTERPRETER_LINE}\n");

    if !description.is_empty() {
        content.push_str(&format!("{DESC_MARKER}{description}\n"));
    }

    for param in params {
        content.push_str(&format!("{PARAM_MARKER} {param}\n"));
    }

    content.push_str(PLACEHOLDER_BODY);
    content.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| get_writer_error(path, e))?;
    }

    fs::write(path, content).map_err(|e| get_writer_error(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(COMMAND_FILE_MODE))
            .map_err(|e| get_writer_error(path, e))?;
    }

    debug!("Created command file `{}`", path.display());

    Ok(())
}

/// Lists command files under `root` whose name contains `filter`.
///
/// Directories are visited in sorted order and the files of each directory
/// are sorted, files before subdirectories. The match is a case-insensitive
/// substring test on the file name without extension; an empty filter
/// matches every command file.
///
/// # Errors
///
/// Returns an error if `root` does not exist or is not a directory, or if a
/// matching command file cannot be read.
pub fn get_list(root: &Path, filter: &str) -> Result<Vec<CommandFile>> {
    if !root.exists() {
        return Err(Error::RootNotFound(root.display().to_string()));
    }

    if !root.is_dir() {
        return Err(Error::RootNotDirectory(root.display().to_string()));
    }

    let filter = filter.to_lowercase();
    let mut items = Vec::new();
    walk(root, root, &filter, &mut items)?;

    debug!(
        "Found {} command file(s) under `{}` for filter `{}`",
        items.len(),
        root.display(),
        filter
    );

    Ok(items)
}

fn walk(base: &Path, directory: &Path, filter: &str, items: &mut Vec<CommandFile>) -> Result<()> {
    let relative = directory
        .strip_prefix(base)
        .map(|relative| relative.to_string_lossy().to_string())
        .unwrap_or_default();

    if relative.contains(VCS_DIRECTORY) {
        return Ok(());
    }

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping unreadable directory `{}`: {e}", directory.display());
            return Ok(());
        }
    };

    let mut files: Vec<PathBuf> = Vec::new();
    let mut directories: Vec<PathBuf> = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => directories.push(path),
            // Symlinked directories are listed but not followed
            Ok(file_type) if file_type.is_symlink() && path.is_dir() => {}
            Ok(_) => files.push(path),
            Err(e) => warn!("Skipping `{}`: {e}", path.display()),
        }
    }

    files.sort();
    directories.sort();

    for file in files {
        let Some(f) = file.file_name().map(|name| name.to_string_lossy().to_string()) else {
            continue;
        };

        let Some(f_name) = f.strip_suffix(SCRIPT_EXTENSION) else {
            continue;
        };

        if filter.is_empty() || f_name.to_lowercase().contains(filter) {
            items.push(CommandFile::parse(base, &file)?);
        }
    }

    for child in directories {
        walk(base, &child, filter, items)?;
    }

    Ok(())
}

/// Picks the single command file to act on.
///
/// A single match is returned as is; several matches are shown to the user
/// who chooses one.
///
/// # Errors
///
/// Returns [`Error::NoMatchingCommand`] if `items` is empty, or an error from
/// the interaction surface.
pub fn select_one<I: Interaction + ?Sized>(
    mut items: Vec<CommandFile>,
    filter: &str,
    interaction: &mut I,
) -> Result<CommandFile> {
    match items.len() {
        0 => Err(Error::NoMatchingCommand(filter.to_string())),
        1 => Ok(items.remove(0)),
        len => {
            let index = interaction.select_command(&items)?;
            if index >= len {
                return Err(Error::Misc(format!("Command index out of range: {index}!")));
            }
            Ok(items.swap_remove(index))
        }
    }
}
