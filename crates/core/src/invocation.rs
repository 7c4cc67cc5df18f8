//! Running a command file with its resolved parameter values.
//!
//! The script receives its parameters on standard input, one line per
//! parameter in declaration order. The values are written straight into the
//! child's stdin pipe, so they are never interpreted by a shell.

use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::command_file::CommandFile;
use crate::error::{Error, Result};

/// A ready-to-run script invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    /// Lines fed to the script's stdin; `None` leaves stdin inherited.
    pub input: Option<Vec<String>>,
}

impl Invocation {
    /// Builds the invocation of `command_file` with `values`, which must be in
    /// parameter declaration order.
    #[must_use]
    pub fn assemble(command_file: &CommandFile, values: Vec<String>) -> Self {
        let input = if command_file.params.is_empty() {
            None
        } else {
            Some(values)
        };

        Self {
            program: command_file.path.clone(),
            input,
        }
    }

    /// Bytes written to the script's stdin.
    #[must_use]
    pub fn stdin_payload(&self) -> Option<String> {
        self.input.as_ref().map(|values| {
            values
                .iter()
                .map(|value| format!("{value}\n"))
                .collect::<String>()
        })
    }

    /// Runs the script and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be spawned, if writing its input
    /// fails, or if it exits with a non-success status.
    pub fn execute(&self) -> Result<()> {
        info!("Executing: {self}");

        let mut command = Command::new(&self.program);
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        let payload = self.stdin_payload();
        if payload.is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::inherit());
        }

        let mut child = command.spawn()?;

        if let Some(payload) = payload {
            if let Some(mut stdin) = child.stdin.take() {
                // The script may exit without reading all of its input
                if let Err(e) = stdin.write_all(payload.as_bytes()) {
                    debug!("Script closed stdin early: {e}");
                }
            }
        }

        let subprocess_exit_success = child.wait()?.success();

        if subprocess_exit_success {
            Ok(())
        } else {
            Err(Error::SubProcessExit)
        }
    }
}

impl Display for Invocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(values) = &self.input {
            let echoes: Vec<String> = values
                .iter()
                .map(|value| format!("echo {}", single_quote(value)))
                .collect();
            write!(formatter, "({}) | ", echoes.join("; "))?;
        }

        formatter.write_str(&single_quote(&self.program.display().to_string()))
    }
}

/// Opens `path` in `editor` and waits for it to exit. `editor` may carry
/// arguments, e.g. `code --wait`.
///
/// # Errors
///
/// Returns an error if the editor cannot be started or exits with a
/// non-success status.
pub fn edit_file(editor: &str, path: &Path) -> Result<()> {
    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| Error::Misc("No editor configured".to_string()))?;

    info!("Editing `{}` with `{editor}`", path.display());

    let subprocess_exit_success = Command::new(program)
        .args(words)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?
        .success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
