use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exiting with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),

    #[error("`git {}` exited with non-success code.", .0)]
    VcsCommand(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Path <{}> does not exist", .0)]
    RootNotFound(String),

    #[error("Path <{}> is not a valid directory", .0)]
    RootNotDirectory(String),

    #[error("File already exists: `{}`", .0)]
    CommandFileExists(String),

    #[error("No command matching `{}`", .0)]
    NoMatchingCommand(String),

    #[error("Value for <{}> must not be empty", .0)]
    MissingValue(String),

    #[error("Parameter #{} has an empty name", .0)]
    EmptyParameterName(usize),

    #[error("Incorrect <{}> value", .0)]
    InvalidInput(String),

    #[error("Application is not initialized for context `{}`. Please run `scut init`", .0)]
    NotInitialized(String),

    #[error("{}", .0)]
    Cancelled(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
