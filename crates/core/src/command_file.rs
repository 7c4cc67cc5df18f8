//! Command file model.
//!
//! A command file is a shell script carrying its own metadata in comment
//! lines:
//!
//! ```text
//! #!/bin/bash
//! #DESC Deploy the app
//! #PARAM env, Target environment, staging
//! #PARAM confirm, Really deploy?, no, true
//! ```

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension identifying command files.
pub const SCRIPT_EXTENSION: &str = ".sh";

pub const DESC_MARKER: &str = "#DESC ";
pub const PARAM_MARKER: &str = "#PARAM";

/// One `#PARAM` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandFileParam {
    pub name: String,
    pub message: String,
    pub default: String,
    pub ask_always: bool,
}

impl CommandFileParam {
    /// Parses the text following the `#PARAM` marker.
    ///
    /// Fields are `name, message, default, ask_always`. Missing trailing fields
    /// fall back to empty strings and `false`, anything past the fourth field
    /// is ignored.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut fields = content.trim().split(',').map(str::trim);

        let name = fields.next().unwrap_or_default().to_string();
        let message = fields.next().unwrap_or_default().to_string();
        let default = fields.next().unwrap_or_default().to_string();
        let ask_always = fields
            .next()
            .is_some_and(|field| field.to_lowercase() == "true");

        Self {
            name,
            message,
            default,
            ask_always,
        }
    }

    /// Text shown when prompting for this parameter.
    #[must_use]
    pub fn prompt_text(&self) -> &str {
        if self.message.is_empty() {
            &self.name
        } else {
            &self.message
        }
    }
}

impl Display for CommandFileParam {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}`", self.name)?;

        if !self.message.is_empty() {
            write!(formatter, " ({})", self.message)?;
        }

        Ok(())
    }
}

/// Snapshot of one script's metadata, taken when the file was discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFile {
    pub path: PathBuf,
    pub root: PathBuf,
    /// `root` relative to the repository root, `/` for the repository root itself.
    pub root_name: String,
    pub f: String,
    /// File name without the script extension.
    pub f_name: String,
    pub desc: String,
    pub params: Vec<CommandFileParam>,
}

impl CommandFile {
    /// Reads `path` and builds its metadata. `base` is the repository root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn parse(base: &Path, path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            Error::io_error("command".to_string(), path.display().to_string(), e)
        })?;

        let mut command_file = Self::from_location(base, path);
        command_file.read_metadata(&String::from_utf8_lossy(&bytes));

        Ok(command_file)
    }

    fn from_location(base: &Path, path: &Path) -> Self {
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let f = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let f_name = f.strip_suffix(SCRIPT_EXTENSION).unwrap_or(&f).to_string();

        Self {
            root_name: relative_root_name(base, &root),
            path: path.to_path_buf(),
            root,
            f,
            f_name,
            desc: String::new(),
            params: Vec::new(),
        }
    }

    fn read_metadata(&mut self, content: &str) {
        for line in content.lines() {
            if let Some(desc) = line.strip_prefix(DESC_MARKER) {
                self.desc = desc.trim().to_string();
            }

            if let Some(param) = line.strip_prefix(PARAM_MARKER) {
                self.params.push(CommandFileParam::parse(param));
            }
        }
    }
}

impl Display for CommandFile {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.desc.is_empty() {
            formatter.write_str(&self.f_name)
        } else {
            write!(formatter, "{} ({})", self.f_name, self.desc)
        }
    }
}

fn relative_root_name(base: &Path, root: &Path) -> String {
    match root.strip_prefix(base) {
        Ok(relative) if relative.as_os_str().is_empty() => "/".to_string(),
        Ok(relative) => format!("/{}", relative.display()),
        Err(_) => root.display().to_string(),
    }
}
