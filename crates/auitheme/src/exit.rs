use std::fmt;
use std::io;

use auitheme_project::ProjectError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: &io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound | io::ErrorKind::AlreadyExists => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn project_error(context: &str, err: ProjectError) -> CliError {
    match &err {
        ProjectError::Io { source, .. } => {
            let code = io_error(context, source).code;
            CliError::new(code, format!("{context}: {err}"))
        }
        ProjectError::FileTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        ProjectError::InvalidKind(_)
        | ProjectError::EmptyName { .. }
        | ProjectError::DuplicateName { .. }
        | ProjectError::IndexOutOfRange { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        ProjectError::Section(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_file_is_failure() {
        let err = ProjectError::Io {
            path: PathBuf::from("/nope.tui"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let cli = project_error("load failed", err);
        assert_eq!(cli.code, FAILURE);
        assert!(cli.message.starts_with("load failed: "));
        assert!(cli.message.contains("/nope.tui"));
    }

    #[test]
    fn oversized_file_is_data_invalid() {
        let err = ProjectError::FileTooLarge {
            path: PathBuf::from("big.tui"),
            size: 10,
            max: 5,
        };
        assert_eq!(project_error("load failed", err).code, DATA_INVALID);
    }
}
