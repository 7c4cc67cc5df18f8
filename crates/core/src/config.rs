//! Context configuration for shell-cuts.
//!
//! A single YAML file maps context names to [`Profile`]s. Each profile points
//! at the directory holding the context's command files and optionally
//! carries git settings used to sync that directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default path for the contexts configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.shell-cuts/config.yml";
/// Default storage directory for the `DEFAULT` context
const DEFAULT_STORAGE_PATH: &str = "~/.shell-cuts/commands";

/// Context used when none is given on the command line
pub const DEFAULT_CONTEXT: &str = "DEFAULT";

/// Default editor when neither `VISUAL` nor `EDITOR` is set
pub const DEFAULT_EDITOR: &str = "vi";

pub const DEFAULT_BRANCH: &str = "main";

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GitSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub remote: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            remote: String::new(),
            user: String::new(),
            email: String::new(),
            branch: default_branch(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub path: String,
    #[serde(default)]
    pub git: GitSettings,
}

impl Profile {
    /// The storage root with `~` expanded.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).to_string())
    }
}

/// Persistence of named profiles.
pub trait ProfileStore {
    /// Loads the profile stored under `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn load(&self, name: &str) -> Result<Option<Profile>>;

    /// Stores `profile` under `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn save(&self, name: &str, profile: &Profile) -> Result<()>;

    /// A fresh, unsaved profile.
    fn create(&self) -> Profile {
        Profile::default()
    }

    /// Names of all stored profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn names(&self) -> Result<Vec<String>>;
}

/// [`ProfileStore`] backed by one YAML file.
#[derive(Debug, Clone)]
pub struct YamlProfileStore {
    path: String,
}

impl YamlProfileStore {
    #[must_use]
    pub fn new(path: String) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Profile>> {
        if !Path::new(&self.path).exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::io_error("config".to_string(), self.path.clone(), e))?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "config".to_string(),
                self.path.clone(),
                e,
            )
        })
    }

    fn write_all(&self, profiles: &BTreeMap<String, Profile>) -> Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io_error("config".to_string(), self.path.clone(), e))?;
        }

        let content = serde_yaml::to_string(profiles).map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                "config".to_string(),
                self.path.clone(),
                e,
            )
        })?;

        fs::write(&self.path, content)
            .map_err(|e| Error::io_error("config".to_string(), self.path.clone(), e))
    }
}

impl ProfileStore for YamlProfileStore {
    fn load(&self, name: &str) -> Result<Option<Profile>> {
        Ok(self.read_all()?.remove(name))
    }

    fn save(&self, name: &str, profile: &Profile) -> Result<()> {
        let mut profiles = self.read_all()?;
        profiles.insert(name.to_string(), profile.clone());
        debug!("Saving context `{name}` to `{}`", self.path);
        self.write_all(&profiles)
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_keys().collect())
    }
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use shell_cuts_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Default storage directory for `context`.
///
/// The `DEFAULT` context uses `~/.shell-cuts/commands`, any other context gets
/// its lowercased name appended, e.g. `~/.shell-cuts/commands-work`.
#[must_use]
pub fn default_storage_path(context: &str) -> String {
    let path = if context == DEFAULT_CONTEXT {
        DEFAULT_STORAGE_PATH.to_string()
    } else {
        format!("{DEFAULT_STORAGE_PATH}-{}", context.to_lowercase())
    };

    shellexpand::tilde(&path).to_string()
}

/// Loads the profile of `context`, requiring its storage directory to exist.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if the context is unknown or its storage
/// directory is missing, or an error if the store cannot be read.
pub fn load_initialized<S: ProfileStore + ?Sized>(store: &S, context: &str) -> Result<Profile> {
    match store.load(context)? {
        Some(profile) if profile.root().is_dir() => Ok(profile),
        Some(profile) => {
            debug!("Storage directory `{}` is missing", profile.path);
            Err(Error::NotInitialized(context.to_string()))
        }
        None => {
            debug!("Known contexts: {:?}", store.names()?);
            Err(Error::NotInitialized(context.to_string()))
        }
    }
}

/// The user's preferred editor.
#[must_use]
pub fn get_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|editor| !editor.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}
