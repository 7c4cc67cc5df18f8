//! Git integration for repository roots.
//!
//! Every operation shells out to `git -C <root> ...` with inherited stdio, so
//! git's own output and credential prompts reach the user directly.

use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::config::GitSettings;
use crate::error::{Error, Result};

const REMOTE_NAME: &str = "origin";

/// Notified after a command file is created, edited or deleted.
pub trait VcsHook {
    /// Records every change under `root` with `message` and publishes it on
    /// `branch`.
    ///
    /// # Errors
    ///
    /// Returns an error if any underlying VCS operation fails.
    fn commit(&self, root: &Path, message: &str, branch: &str) -> Result<()>;
}

/// Git command line wrapper.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
}

impl Default for Git {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl Git {
    /// A wrapper running `program` in place of `git`.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, root: &Path, args: &[&str]) -> Result<()> {
        debug!("Running `{} {}` in `{}`", self.program, args.join(" "), root.display());

        let success = Command::new(&self.program)
            .arg("-C")
            .arg(root)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?
            .wait()?
            .success();

        if success {
            Ok(())
        } else {
            Err(Error::VcsCommand(args.first().copied().unwrap_or_default().to_string()))
        }
    }

    /// Turns `root` into a git repository tracking `settings.remote`.
    ///
    /// With `pull`, the existing remote branch is fetched; otherwise the
    /// current content is committed and pushed as the branch's first commit.
    ///
    /// # Errors
    ///
    /// Returns an error if any git command fails.
    pub fn init(&self, root: &Path, settings: &GitSettings, pull: bool) -> Result<()> {
        let initial_branch = format!("--initial-branch={}", settings.branch);
        self.run(root, &["init", &initial_branch])?;
        self.run(root, &["config", "user.name", &settings.user])?;
        self.run(root, &["config", "user.email", &settings.email])?;
        self.run(root, &["remote", "add", REMOTE_NAME, &settings.remote])?;

        if pull {
            self.pull(root, &settings.branch)
        } else {
            self.run(root, &["add", "-A"])?;
            self.run(root, &["commit", "-m", "Initial commit"])?;
            self.run(root, &["push", "-u", REMOTE_NAME, &settings.branch])
        }
    }

    /// # Errors
    ///
    /// Returns an error if `git status` fails.
    pub fn status(&self, root: &Path) -> Result<()> {
        self.run(root, &["status"])
    }

    /// # Errors
    ///
    /// Returns an error if `git pull` fails.
    pub fn pull(&self, root: &Path, branch: &str) -> Result<()> {
        self.run(root, &["pull", REMOTE_NAME, branch])
    }

    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn push(&self, root: &Path, branch: &str) -> Result<()> {
        self.run(root, &["push", REMOTE_NAME, branch])
    }

    /// Pulls then pushes `branch`.
    ///
    /// # Errors
    ///
    /// Returns an error if either step fails; nothing is pushed if the pull
    /// fails.
    pub fn sync(&self, root: &Path, branch: &str) -> Result<()> {
        self.pull(root, branch)?;
        self.push(root, branch)
    }
}

impl VcsHook for Git {
    fn commit(&self, root: &Path, message: &str, branch: &str) -> Result<()> {
        info!("Committing `{message}` on `{branch}`");
        self.run(root, &["add", "-A"])?;
        self.run(root, &["commit", "-m", message])?;
        self.push(root, branch)
    }
}
